mod options;
mod pipeline;
mod sinks;

pub use options::{CSV_CONTENT_TYPE, CSV_HEADER, ExportReport, content_disposition};
pub use pipeline::{export_csv, export_file, export_to_writer};
