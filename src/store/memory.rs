use std::sync::Arc;

use super::{RecordStore, SAMPLE_CSV, read_records};
use crate::errors::ServiceError;
use crate::record::PatientVisitRecord;

/// Fixed in-memory record set, shared cheaply between handlers.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Vec<PatientVisitRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Vec<PatientVisitRecord>) -> Self {
        Self { records: Arc::new(records) }
    }

    /// Store seeded with the bundled sample visits.
    ///
    /// # Errors
    /// Returns an error if the bundled CSV fails to parse.
    pub fn sample() -> Result<Self, ServiceError> {
        Ok(Self::new(read_records(SAMPLE_CSV.as_bytes())?))
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self) -> Result<Vec<PatientVisitRecord>, ServiceError> {
        Ok(self.records.as_ref().clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} records)", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_fifteen_visits() {
        let all = MemoryStore::sample().unwrap().fetch_all().unwrap();
        assert_eq!(all.len(), 15);
        assert_eq!(all[0].patient_id, "P001");
        assert_eq!(all[14].patient_id, "P015");
    }

    #[test]
    fn empty_store_scans_nothing() {
        let store = MemoryStore::default();
        assert!(store.fetch_all().unwrap().is_empty());
        assert_eq!(store.describe(), "memory (0 records)");
    }
}
