//! Batch error types

use thiserror::Error;

/// Errors raised while driving a batch
#[derive(Debug, Error)]
pub enum BatchError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with something other than 200
    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BatchError {
    /// Whether another attempt at the same item may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, BatchError::Transport(_) | BatchError::Status(_))
    }
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, BatchError>;
