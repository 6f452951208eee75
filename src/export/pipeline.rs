use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

use super::options::ExportReport;
use super::sinks::CsvSink;
use crate::errors::ServiceError;
use crate::query::{self, ExportCriteria, telemetry};
use crate::record::PatientVisitRecord;

/// Write the records matching `criteria` to `writer` as CSV under the fixed header.
///
/// # Errors
/// Returns an error if writing to the underlying writer fails.
pub fn export_to_writer<W: Write>(
    records: &[PatientVisitRecord],
    criteria: &ExportCriteria,
    writer: W,
) -> Result<ExportReport, ServiceError> {
    let start = Instant::now();
    let mut report = ExportReport::default();
    let mut sink = CsvSink::new(writer)?;
    let filter = criteria.to_filter();
    for r in records.iter().filter(|r| query::eval_filter(r, &filter)) {
        sink.write_record(r)?;
        report.written += 1;
    }
    sink.finish()?;
    let detail = serde_json::to_string(criteria)?;
    let written = usize::try_from(report.written).unwrap_or(usize::MAX);
    telemetry::record("export", &detail, records.len(), written, start.elapsed());
    Ok(report)
}

/// Render the CSV export body in memory, with the fixed header.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn export_csv(
    records: &[PatientVisitRecord],
    criteria: &ExportCriteria,
) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    export_to_writer(records, criteria, &mut buf)?;
    Ok(buf)
}

/// Export to a file atomically via a temp file + persist.
///
/// # Errors
/// Returns an error if the destination cannot be created or the write/persist fails.
pub fn export_file(
    records: &[PatientVisitRecord],
    criteria: &ExportCriteria,
    path: impl AsRef<Path>,
) -> Result<ExportReport, ServiceError> {
    let dest = path.as_ref();
    log::info!("export: path={}", dest.display());
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    // Temp file in the same directory so the rename stays on one filesystem
    let mut tmp = NamedTempFile::new_in(parent)?;
    let report = export_to_writer(records, criteria, &mut tmp)?;
    let mut last_err: Option<io::Error> = None;
    for attempt in 0..5u64 {
        match tmp.persist(dest) {
            Ok(_) => return Ok(report),
            Err(pe) => {
                last_err = Some(pe.error);
                tmp = pe.file;
                std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other("failed to persist export file")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CSV_HEADER;
    use crate::store::{MemoryStore, RecordStore};

    #[test]
    fn empty_export_still_has_header() {
        let body = export_csv(&[], &ExportCriteria::default()).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert_eq!(
            text.trim_end(),
            "Patient ID,Date,Age,Gender,Diagnosis,Lab Results,Medication,Visit Type,Outcome"
        );
    }

    #[test]
    fn writes_one_row_per_match() {
        let records = MemoryStore::sample().unwrap().fetch_all().unwrap();
        let criteria = ExportCriteria { gender: Some("Male".into()), ..Default::default() };
        let mut buf = Vec::new();
        let rep = export_to_writer(&records, &criteria, &mut buf).unwrap();
        assert_eq!(rep.written, 7);
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER.join(","));
        assert!(lines.all(|l| l.contains(",Male,")));
    }
}
