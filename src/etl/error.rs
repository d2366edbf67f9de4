use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response from backend: {0}")]
    Decode(String),
    #[error("{message}")]
    Backend { status: u16, message: String },
}

/// Reasons a run is refused before any request leaves the app.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Select a transformation first")]
    NoSelection,
    #[error("{field} must be empty or a valid date in YYYY-MM-DD format (got '{value}')")]
    InvalidDate { field: &'static str, value: String },
}
