use thiserror::Error;

/// Main error type for murex operations
#[derive(Error, Debug)]
pub enum MurexError {
    #[error("invalid {kind} query: {reason}")]
    InvalidQuery { kind: &'static str, reason: String },

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index writer is closed")]
    WriterClosed,
}

/// Result type alias for murex operations
pub type Result<T> = std::result::Result<T, MurexError>;

impl MurexError {
    /// Check if this error is caused by a malformed request rather than
    /// an engine-side failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MurexError::InvalidQuery { .. } | MurexError::InvalidDate(_)
        )
    }
}
