use std::io::{self, BufWriter, Write};

use super::options::CSV_HEADER;
use crate::record::PatientVisitRecord;

/// Comma-separated rows under the fixed header. The header is written up
/// front, so an export with no matches still carries it.
pub struct CsvSink<W: Write> {
    w: csv::Writer<BufWriter<W>>,
}

impl<W: Write> CsvSink<W> {
    /// # Errors
    /// Returns an error if the header row cannot be written.
    pub fn new(inner: W) -> io::Result<Self> {
        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(inner));
        w.write_record(CSV_HEADER).map_err(|e| io::Error::other(e.to_string()))?;
        Ok(Self { w })
    }

    pub fn write_record(&mut self, r: &PatientVisitRecord) -> io::Result<()> {
        let row = [
            r.patient_id.clone(),
            r.visit_date.format("%Y-%m-%d").to_string(),
            r.age.to_string(),
            r.gender.clone(),
            r.diagnosis.clone(),
            format_lab(r.lab_results),
            r.medication.clone().unwrap_or_default(),
            r.visit_type.clone(),
            r.outcome.clone(),
        ];
        self.w.write_record(&row).map_err(|e| io::Error::other(e.to_string()))
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.w.flush()
    }
}

// Debug formatting keeps a trailing ".0" on whole numbers (150.0, not 150).
fn format_lab(v: f64) -> String {
    format!("{v:?}")
}
