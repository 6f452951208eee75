use std::sync::Arc;

use crate::PatientVisits;
use crate::store::RecordStore;

/// Shared handler state. Holds nothing mutable.
#[derive(Clone)]
pub struct AppState {
    service: PatientVisits,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { service: PatientVisits::new(store) }
    }

    #[must_use]
    pub fn service(&self) -> PatientVisits {
        self.service.clone()
    }
}

impl From<PatientVisits> for AppState {
    fn from(service: PatientVisits) -> Self {
        Self { service }
    }
}
