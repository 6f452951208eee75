//! Per-diagnosis dashboard metrics over a filtered record set.

use serde::Serialize;
use std::time::Instant;

use crate::errors::ServiceError;
use crate::query::{self, FilterCriteria, telemetry};
use crate::record::PatientVisitRecord;
use crate::store::RecordStore;

/// Outcome counted as adverse, compared case-insensitively.
pub const ADVERSE_OUTCOME: &str = "admitted";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisSummary {
    pub diagnosis: String,
    pub visits: usize,
    pub average_lab_results: f64,
    pub adverse_outcomes: usize,
    pub adverse_outcome_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_visits: usize,
    /// `None` when there are no visits.
    pub average_lab_results: Option<f64>,
    pub adverse_outcomes: usize,
    /// Most visited first; ties keep first-seen order.
    pub by_diagnosis: Vec<DiagnosisSummary>,
}

#[derive(Default)]
struct Acc {
    visits: usize,
    lab_total: f64,
    adverse: usize,
}

#[must_use]
pub fn is_adverse(record: &PatientVisitRecord) -> bool {
    record.outcome.eq_ignore_ascii_case(ADVERSE_OUTCOME)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(records: &[PatientVisitRecord]) -> Summary {
    let mut groups: Vec<(String, Acc)> = Vec::new();
    let mut lab_total = 0.0;
    let mut adverse_total = 0;
    for r in records {
        lab_total += r.lab_results;
        if is_adverse(r) {
            adverse_total += 1;
        }
        // Visits without a diagnosis count toward the totals only.
        if r.diagnosis.trim().is_empty() {
            continue;
        }
        let idx = match groups.iter().position(|(d, _)| *d == r.diagnosis) {
            Some(i) => i,
            None => {
                groups.push((r.diagnosis.clone(), Acc::default()));
                groups.len() - 1
            }
        };
        let acc = &mut groups[idx].1;
        acc.visits += 1;
        acc.lab_total += r.lab_results;
        if is_adverse(r) {
            acc.adverse += 1;
        }
    }
    let mut by_diagnosis: Vec<DiagnosisSummary> = groups
        .into_iter()
        .map(|(diagnosis, acc)| DiagnosisSummary {
            diagnosis,
            visits: acc.visits,
            average_lab_results: acc.lab_total / acc.visits as f64,
            adverse_outcomes: acc.adverse,
            adverse_outcome_pct: acc.adverse as f64 * 100.0 / acc.visits as f64,
        })
        .collect();
    by_diagnosis.sort_by(|a, b| b.visits.cmp(&a.visits));
    Summary {
        total_visits: records.len(),
        average_lab_results: (!records.is_empty()).then(|| lab_total / records.len() as f64),
        adverse_outcomes: adverse_total,
        by_diagnosis,
    }
}

/// Filter the store by `criteria` and summarize what matched.
///
/// # Errors
/// Propagates the store's error if the scan fails.
pub fn load_summary(
    store: &dyn RecordStore,
    criteria: &FilterCriteria,
) -> Result<Summary, ServiceError> {
    let start = Instant::now();
    let records = store.fetch_all()?;
    let scanned = records.len();
    let matched = query::filter(records, criteria);
    let summary = summarize(&matched);
    let detail = serde_json::to_string(criteria)?;
    telemetry::record("summary", &detail, scanned, matched.len(), start.elapsed());
    Ok(summary)
}
