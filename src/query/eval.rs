use super::types::{CmpOp, Filter};
use crate::record::PatientVisitRecord;

pub fn eval_filter(record: &PatientVisitRecord, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(record, f)),
        Filter::Eq { field, value } => field.value_of(record) == value,
        // An empty set never reaches here from criteria; treat it as unconstrained anyway.
        Filter::In { field, values } => {
            values.is_empty() || values.contains(field.value_of(record))
        }
        Filter::Date { op, value } => match op {
            CmpOp::Gte => record.visit_date >= *value,
            CmpOp::Lte => record.visit_date <= *value,
        },
    }
}
