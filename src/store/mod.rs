//! Record stores: the read-only source every query scans.

mod csv_file;
mod memory;

pub use csv_file::{CsvStore, read_records};
pub use memory::MemoryStore;

use crate::errors::ServiceError;
use crate::record::PatientVisitRecord;

/// Supplies the full, unfiltered record set.
///
/// Called once per request; implementations may hit disk on every call.
pub trait RecordStore: Send + Sync {
    /// # Errors
    /// Returns an error if the backing source cannot be read.
    fn fetch_all(&self) -> Result<Vec<PatientVisitRecord>, ServiceError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

/// The 15-visit dataset shipped with the crate.
pub(crate) const SAMPLE_CSV: &str = include_str!("sample_visits.csv");
