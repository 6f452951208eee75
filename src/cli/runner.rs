use std::io::Write;

use super::command::Command;
use crate::PatientVisits;
use crate::errors::ServiceError;
use crate::export::export_file;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputMode {
    /// Indented JSON.
    Pretty,
    /// Compact single-line JSON.
    Json,
    /// Tab-separated text for shell pipelines.
    Plain,
}

fn emit<W: Write, T: serde::Serialize>(out: &mut W, mode: OutputMode, value: &T) -> Result<(), ServiceError> {
    let s = match mode {
        OutputMode::Json => serde_json::to_string(value)?,
        _ => serde_json::to_string_pretty(value)?,
    };
    writeln!(out, "{s}")?;
    Ok(())
}

/// Run a command, writing its result to `out` in the given mode.
///
/// # Errors
/// Returns an error if the store scan, export or output fails.
pub fn run_with_format<W: Write>(
    service: &PatientVisits,
    cmd: Command,
    mode: OutputMode,
    out: &mut W,
) -> Result<(), ServiceError> {
    match cmd {
        Command::Query { criteria } => {
            let records = service.find(&criteria)?;
            if mode == OutputMode::Plain {
                for r in &records {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}\t{:?}\t{}\t{}\t{}",
                        r.patient_id,
                        r.visit_date,
                        r.age,
                        r.gender,
                        r.diagnosis,
                        r.lab_results,
                        r.medication.as_deref().unwrap_or("-"),
                        r.visit_type,
                        r.outcome
                    )?;
                }
                return Ok(());
            }
            emit(out, mode, &records)
        }
        Command::Export { criteria, file } => {
            let records = service.store().fetch_all()?;
            let report = export_file(&records, &criteria, &file)?;
            match mode {
                OutputMode::Plain => writeln!(out, "written {} to {}", report.written, file.display())?,
                _ => emit(
                    out,
                    mode,
                    &serde_json::json!({"action": "exported", "written": report.written, "file": file}),
                )?,
            }
            Ok(())
        }
        Command::Options => {
            let options = service.filter_options()?;
            if mode == OutputMode::Plain {
                writeln!(out, "diagnosis\t{}", options.diagnosis_options.join(", "))?;
                writeln!(out, "gender\t{}", options.gender_options.join(", "))?;
                writeln!(out, "visit_type\t{}", options.visit_type_options.join(", "))?;
                return Ok(());
            }
            emit(out, mode, &options)
        }
        Command::Summary { criteria } => {
            let summary = service.summary(&criteria)?;
            if mode == OutputMode::Plain {
                for d in &summary.by_diagnosis {
                    writeln!(
                        out,
                        "{}\t{} visits\tavg lab {:.2}\tadverse {:.2}%",
                        d.diagnosis, d.visits, d.average_lab_results, d.adverse_outcome_pct
                    )?;
                }
                return Ok(());
            }
            emit(out, mode, &summary)
        }
    }
}
