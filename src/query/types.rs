use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::record::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gte,
    Lte,
}

/// Composed predicate over a single record.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    /// Field equals one exact value.
    Eq { field: Field, value: String },
    /// Field equals any of the values.
    In { field: Field, values: BTreeSet<String> },
    /// Visit date compared against a bound.
    Date { op: CmpOp, value: NaiveDate },
}

/// Criteria for the list/filter query: OR within a dimension, AND across them.
///
/// An empty set means "no constraint on this dimension", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub diagnoses: BTreeSet<String>,
    pub genders: BTreeSet<String>,
    pub visit_types: BTreeSet<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn values_mut(&mut self, field: Field) -> &mut BTreeSet<String> {
        match field {
            Field::Diagnosis => &mut self.diagnoses,
            Field::Gender => &mut self.genders,
            Field::VisitType => &mut self.visit_types,
        }
    }

    #[must_use]
    pub fn values(&self, field: Field) -> &BTreeSet<String> {
        match field {
            Field::Diagnosis => &self.diagnoses,
            Field::Gender => &self.genders,
            Field::VisitType => &self.visit_types,
        }
    }

    /// Build the predicate tree. Dimensions with no values are left out.
    #[must_use]
    pub fn to_filter(&self) -> Filter {
        let mut parts = Vec::new();
        for field in Field::ALL {
            let values = self.values(field);
            if !values.is_empty() {
                parts.push(Filter::In { field, values: values.clone() });
            }
        }
        if let Some(from) = self.from_date {
            parts.push(Filter::Date { op: CmpOp::Gte, value: from });
        }
        if let Some(to) = self.to_date {
            parts.push(Filter::Date { op: CmpOp::Lte, value: to });
        }
        conjoin(parts)
    }
}

/// Criteria for CSV export: at most one value per dimension, no date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportCriteria {
    pub diagnosis: Option<String>,
    pub gender: Option<String>,
    pub visit_type: Option<String>,
}

impl ExportCriteria {
    #[must_use]
    pub fn value(&self, field: Field) -> Option<&str> {
        match field {
            Field::Diagnosis => self.diagnosis.as_deref(),
            Field::Gender => self.gender.as_deref(),
            Field::VisitType => self.visit_type.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Diagnosis => &mut self.diagnosis,
            Field::Gender => &mut self.gender,
            Field::VisitType => &mut self.visit_type,
        };
        *slot = Some(value);
    }

    #[must_use]
    pub fn to_filter(&self) -> Filter {
        let parts = Field::ALL
            .into_iter()
            .filter_map(|field| {
                self.value(field).map(|v| Filter::Eq { field, value: v.to_string() })
            })
            .collect();
        conjoin(parts)
    }
}

fn conjoin(mut parts: Vec<Filter>) -> Filter {
    match parts.len() {
        0 => Filter::True,
        1 => parts.remove(0),
        _ => Filter::And(parts),
    }
}
