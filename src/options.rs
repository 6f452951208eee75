use serde::Serialize;
use std::collections::HashSet;
use std::time::Instant;

use crate::errors::ServiceError;
use crate::query::telemetry;
use crate::record::{Field, PatientVisitRecord};
use crate::store::RecordStore;

/// Distinct values per categorical field, for populating filter widgets.
///
/// Values appear in the order they are first seen in the record set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub diagnosis_options: Vec<String>,
    pub gender_options: Vec<String>,
    pub visit_type_options: Vec<String>,
}

#[must_use]
pub fn list_options(records: &[PatientVisitRecord]) -> FilterOptions {
    FilterOptions {
        diagnosis_options: distinct(records, Field::Diagnosis),
        gender_options: distinct(records, Field::Gender),
        visit_type_options: distinct(records, Field::VisitType),
    }
}

/// # Errors
/// Propagates the store's error if the scan fails.
pub fn load_options(store: &dyn RecordStore) -> Result<FilterOptions, ServiceError> {
    let start = Instant::now();
    let records = store.fetch_all()?;
    let options = list_options(&records);
    let distinct_total = options.diagnosis_options.len()
        + options.gender_options.len()
        + options.visit_type_options.len();
    telemetry::record("filter_options", "{}", records.len(), distinct_total, start.elapsed());
    Ok(options)
}

fn distinct(records: &[PatientVisitRecord], field: Field) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| field.value_of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
