// Telemetry is a submodule of query
pub mod telemetry;

mod eval;
mod exec;
mod parse;
mod types;

pub use eval::eval_filter;
pub use exec::{filter, find};
pub use parse::{parse_date, parse_export_params, parse_filter_params};
pub use types::{CmpOp, ExportCriteria, Filter, FilterCriteria};
