/// Fixed export header, in column order.
pub const CSV_HEADER: [&str; 9] = [
    "Patient ID",
    "Date",
    "Age",
    "Gender",
    "Diagnosis",
    "Lab Results",
    "Medication",
    "Visit Type",
    "Outcome",
];

pub const EXPORT_FILENAME: &str = "patient_data.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// `Content-Disposition` value marking the export as a download.
#[must_use]
pub fn content_disposition() -> String {
    format!("attachment; filename=\"{EXPORT_FILENAME}\"")
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub written: u64,
}
