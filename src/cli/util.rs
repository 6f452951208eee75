use super::runner::OutputMode;
use crate::errors::ServiceError;

/// # Errors
/// Returns an error for an unknown mode name.
pub fn parse_output_mode(name: Option<&str>) -> Result<OutputMode, ServiceError> {
    match name.map(str::to_ascii_lowercase).as_deref() {
        None | Some("pretty") => Ok(OutputMode::Pretty),
        Some("json") => Ok(OutputMode::Json),
        Some("plain") => Ok(OutputMode::Plain),
        Some(other) => Err(ServiceError::InvalidArgument(format!("unknown output mode: {other}"))),
    }
}
