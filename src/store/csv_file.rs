use chrono::NaiveDate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use super::RecordStore;
use crate::errors::ServiceError;
use crate::record::PatientVisitRecord;

/// Reads records from a CSV file on every scan, so edits to the file show up
/// on the next request.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for CsvStore {
    fn fetch_all(&self) -> Result<Vec<PatientVisitRecord>, ServiceError> {
        let file = File::open(&self.path).map_err(|e| {
            ServiceError::Store(format!("cannot open {}: {e}", self.path.display()))
        })?;
        let records = read_records(file)?;
        log::debug!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("csv ({})", self.path.display())
    }
}

// Accepts both the table's column names and the export header.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "PatientID", alias = "Patient ID")]
    patient_id: String,
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Age")]
    age: u32,
    #[serde(alias = "Gender")]
    gender: String,
    #[serde(alias = "Diagnosis")]
    diagnosis: String,
    #[serde(alias = "LabResults", alias = "Lab Results")]
    lab_results: f64,
    #[serde(default, alias = "Medication")]
    medication: Option<String>,
    #[serde(alias = "VisitType", alias = "Visit Type")]
    visit_type: String,
    #[serde(alias = "Outcome")]
    outcome: String,
}

impl From<CsvRow> for PatientVisitRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            patient_id: row.patient_id,
            visit_date: row.date,
            age: row.age,
            gender: row.gender,
            diagnosis: row.diagnosis,
            lab_results: row.lab_results,
            medication: row.medication.filter(|m| !m.trim().is_empty()),
            visit_type: row.visit_type,
            outcome: row.outcome,
        }
    }
}

/// Parse a headed CSV stream into records, in file order.
///
/// # Errors
/// Returns an error on the first malformed row (bad date, non-numeric age or
/// lab result, missing required column).
pub fn read_records<R: Read>(reader: R) -> Result<Vec<PatientVisitRecord>, ServiceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize::<CsvRow>() {
        out.push(row?.into());
    }
    Ok(out)
}
