use thiserror::Error;

/// spendtrack error types
#[derive(Error, Debug)]
pub enum SpendtrackError {
    /// Failed to parse JSON or a field value
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Record or user store operation failed
    #[error("store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for spendtrack
pub type Result<T> = std::result::Result<T, SpendtrackError>;

/// Caller-facing failure of the summary action.
///
/// The display strings are the whole contract: no internal detail leaks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    /// No signed-in caller
    #[error("User not found")]
    Unauthenticated,

    /// The record fetch failed for any reason
    #[error("Database error")]
    Persistence,
}
