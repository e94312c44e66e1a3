//! Errors raised at the decoding boundary.
//!
//! The store itself never fails; only turning raw JSON or files into
//! features can.

use thiserror::Error;

/// Draft decoding errors.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for draft decoding.
pub type DraftResult<T> = Result<T, DraftError>;
