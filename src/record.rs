use chrono::NaiveDate;
use serde::Serialize;

/// One patient visit. Field names on the wire follow the dashboard consumer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientVisitRecord {
    pub patient_id: String,
    #[serde(rename = "date")]
    pub visit_date: NaiveDate,
    pub age: u32,
    pub gender: String,
    pub diagnosis: String,
    pub lab_results: f64,
    pub medication: Option<String>,
    pub visit_type: String,
    pub outcome: String,
}

/// Categorical dimensions a record can be filtered or grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Diagnosis,
    Gender,
    VisitType,
}

impl Field {
    pub const ALL: [Self; 3] = [Self::Diagnosis, Self::Gender, Self::VisitType];

    #[must_use]
    pub fn value_of(self, record: &PatientVisitRecord) -> &str {
        match self {
            Self::Diagnosis => &record.diagnosis,
            Self::Gender => &record.gender,
            Self::VisitType => &record.visit_type,
        }
    }

    /// Query parameter name used by the HTTP and CLI surfaces.
    #[must_use]
    pub fn param(self) -> &'static str {
        match self {
            Self::Diagnosis => "diagnosis",
            Self::Gender => "gender",
            Self::VisitType => "visit_type",
        }
    }
}
