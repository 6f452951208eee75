use chrono::NaiveDate;

use super::types::{ExportCriteria, FilterCriteria};
use crate::errors::ServiceError;
use crate::record::Field;

pub const FROM_DATE_PARAM: &str = "from_date";
pub const TO_DATE_PARAM: &str = "to_date";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build list-query criteria from raw `(key, value)` query pairs.
///
/// Dimension keys repeat (`diagnosis[]=A&diagnosis[]=B`); the bare form
/// (`diagnosis=A`) is accepted too. Blank values are dropped. For the date keys
/// the last occurrence wins and a blank value means "no bound". Unknown keys
/// are ignored.
///
/// # Errors
/// Returns `ServiceError::InvalidDate` if a date is not `YYYY-MM-DD`.
pub fn parse_filter_params<I, K, V>(pairs: I) -> Result<FilterCriteria, ServiceError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = FilterCriteria::default();
    for (k, v) in pairs {
        let key = k.as_ref();
        let value = v.as_ref();
        match key {
            FROM_DATE_PARAM => criteria.from_date = parse_date(key, value)?,
            TO_DATE_PARAM => criteria.to_date = parse_date(key, value)?,
            _ => {
                let base = key.strip_suffix("[]").unwrap_or(key);
                if let Some(field) = field_for(base)
                    && !value.trim().is_empty()
                {
                    criteria.values_mut(field).insert(value.to_string());
                }
            }
        }
    }
    Ok(criteria)
}

/// Build export criteria from raw query pairs.
///
/// Only the bare single-valued keys count; when one repeats, the last value
/// wins. Date and bracketed keys are ignored on this path.
pub fn parse_export_params<I, K, V>(pairs: I) -> ExportCriteria
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut criteria = ExportCriteria::default();
    for (k, v) in pairs {
        let value = v.as_ref();
        if value.trim().is_empty() {
            continue;
        }
        if let Some(field) = field_for(k.as_ref()) {
            criteria.set(field, value.to_string());
        }
    }
    criteria
}

/// Parse an optional `YYYY-MM-DD` date. Blank input yields `None`.
///
/// # Errors
/// Returns `ServiceError::InvalidDate` naming `param` if the value does not parse.
pub fn parse_date(param: &str, value: &str) -> Result<Option<NaiveDate>, ServiceError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map(Some).map_err(|_| {
        ServiceError::InvalidDate { param: param.to_string(), value: value.to_string() }
    })
}

fn field_for(name: &str) -> Option<Field> {
    Field::ALL.into_iter().find(|f| f.param() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_and_bare_keys_accumulate() {
        let c = parse_filter_params([
            ("diagnosis[]", "Hypertension"),
            ("diagnosis[]", "Asthma"),
            ("diagnosis", "COVID-19"),
            ("gender[]", "Female"),
            ("visit_type[]", "Emergency"),
        ])
        .unwrap();
        assert_eq!(c.diagnoses.len(), 3);
        assert!(c.genders.contains("Female"));
        assert!(c.visit_types.contains("Emergency"));
    }

    #[test]
    fn blank_values_are_no_constraint() {
        let c = parse_filter_params([("diagnosis[]", ""), ("gender", "  "), ("from_date", "")])
            .unwrap();
        assert_eq!(c, FilterCriteria::default());
    }

    #[test]
    fn malformed_date_is_rejected() {
        let err = parse_filter_params([("from_date", "2024-13-40")]).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("from_date"));
        assert!(parse_filter_params([("to_date", "yesterday")]).is_err());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let c = parse_filter_params([("outcome", "Admitted"), ("page", "2")]).unwrap();
        assert_eq!(c, FilterCriteria::default());
    }

    #[test]
    fn export_takes_last_single_value() {
        let e = parse_export_params([
            ("diagnosis", "Asthma"),
            ("diagnosis", "Hypertension"),
            ("gender[]", "Female"),
            ("from_date", "2024-01-01"),
        ]);
        assert_eq!(e.diagnosis.as_deref(), Some("Hypertension"));
        assert_eq!(e.gender, None);
        assert_eq!(e.visit_type, None);
    }
}
