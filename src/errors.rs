use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid date for `{param}`: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { param: String, value: String },

    #[error("record store error: {0}")]
    Store(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("logging error: {0}")]
    Logging(String),
}

impl ServiceError {
    /// True when the failure was caused by the caller's input rather than the service.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidDate { .. } | Self::InvalidArgument(_))
    }
}
