use std::time::Instant;

use super::eval::eval_filter;
use super::telemetry;
use super::types::{Filter, FilterCriteria};
use crate::errors::ServiceError;
use crate::record::PatientVisitRecord;
use crate::store::RecordStore;

/// Keep the records matching `filter`, in their original order.
fn select(mut records: Vec<PatientVisitRecord>, filter: &Filter) -> Vec<PatientVisitRecord> {
    records.retain(|r| eval_filter(r, filter));
    records
}

/// Stable filter by list-query criteria.
#[must_use]
pub fn filter(records: Vec<PatientVisitRecord>, criteria: &FilterCriteria) -> Vec<PatientVisitRecord> {
    select(records, &criteria.to_filter())
}

/// Scan the store once and return the records matching `criteria`.
///
/// # Errors
/// Propagates the store's error if the scan fails.
pub fn find(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
) -> Result<Vec<PatientVisitRecord>, ServiceError> {
    let start = Instant::now();
    let records = store.fetch_all()?;
    let scanned = records.len();
    let out = filter(records, criteria);
    let detail = serde_json::to_string(criteria)?;
    telemetry::record("find", &detail, scanned, out.len(), start.elapsed());
    Ok(out)
}
