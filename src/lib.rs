pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod export;
pub mod logger;
pub mod options;
pub mod query;
pub mod record;
pub mod store;
pub mod summary;

use crate::errors::ServiceError;
use crate::options::FilterOptions;
use crate::query::{ExportCriteria, FilterCriteria};
use crate::record::PatientVisitRecord;
use crate::store::RecordStore;
use crate::summary::Summary;
use std::sync::Arc;

/// Read-only façade over a record store.
#[derive(Clone)]
pub struct PatientVisits {
    store: Arc<dyn RecordStore>,
}

impl PatientVisits {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Service backed by the bundled sample visits.
    ///
    /// # Errors
    /// Returns an error if the bundled data fails to parse.
    pub fn sample() -> Result<Self, ServiceError> {
        Ok(Self::new(Arc::new(store::MemoryStore::sample()?)))
    }

    #[must_use]
    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    /// Records matching `criteria`, in store order.
    ///
    /// # Errors
    /// Propagates the store's error if the scan fails.
    pub fn find(&self, criteria: &FilterCriteria) -> Result<Vec<PatientVisitRecord>, ServiceError> {
        query::find(self.store.as_ref(), criteria)
    }

    /// # Errors
    /// Propagates the store's error if the scan fails.
    pub fn filter_options(&self) -> Result<FilterOptions, ServiceError> {
        options::load_options(self.store.as_ref())
    }

    /// # Errors
    /// Propagates the store's error if the scan fails.
    pub fn summary(&self, criteria: &FilterCriteria) -> Result<Summary, ServiceError> {
        summary::load_summary(self.store.as_ref(), criteria)
    }

    /// CSV export body for `criteria`.
    ///
    /// # Errors
    /// Returns an error if the scan or serialization fails.
    pub fn export_csv(&self, criteria: &ExportCriteria) -> Result<Vec<u8>, ServiceError> {
        let records = self.store.fetch_all()?;
        export::export_csv(&records, criteria)
    }
}
