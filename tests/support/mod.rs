#![allow(dead_code)]

use chrono::NaiveDate;
use patient_visits::record::PatientVisitRecord;
use patient_visits::store::{MemoryStore, RecordStore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
pub fn visit(
    id: &str,
    diagnosis: &str,
    gender: &str,
    age: u32,
    lab_results: f64,
    visit_date: NaiveDate,
    visit_type: &str,
    outcome: &str,
) -> PatientVisitRecord {
    PatientVisitRecord {
        patient_id: id.into(),
        visit_date,
        age,
        gender: gender.into(),
        diagnosis: diagnosis.into(),
        lab_results,
        medication: None,
        visit_type: visit_type.into(),
        outcome: outcome.into(),
    }
}

/// The bundled 15-visit dataset.
pub fn sample_records() -> Vec<PatientVisitRecord> {
    MemoryStore::sample().unwrap().fetch_all().unwrap()
}

/// Three visits: two Hypertension, one Asthma; one Male.
pub fn three_visits() -> Vec<PatientVisitRecord> {
    vec![
        visit("1", "Hypertension", "Male", 45, 150.0, date(2024, 1, 15), "Routine Checkup", "Admitted"),
        visit("2", "Asthma", "Female", 32, 130.0, date(2024, 2, 10), "Emergency", "Discharged"),
        visit("3", "Hypertension", "Female", 50, 140.0, date(2024, 3, 20), "Routine Checkup", "Admitted"),
    ]
}

pub fn ids(records: &[PatientVisitRecord]) -> Vec<&str> {
    records.iter().map(|r| r.patient_id.as_str()).collect()
}
