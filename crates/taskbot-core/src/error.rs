use thiserror::Error;

/// Backend failures surfaced by [`crate::store::Store`] implementations.
///
/// These are real errors, not a swallowed empty result: the controller
/// renders them distinctly from a genuinely empty listing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("auth error: {0}")]
    Auth(String),

    #[error("worksheet not found: {0}")]
    WorksheetMissing(String),

    #[error("malformed row {row} in worksheet '{sheet}': {reason}")]
    MalformedRow {
        sheet: String,
        row: usize,
        reason: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Free-text input that doesn't match the newline-delimited field layout.
/// Reported to the user inline; the awaiting flag is kept so they can retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("need at least {required} line(s), got {got}")]
    TooFewLines { required: usize, got: usize },
}
