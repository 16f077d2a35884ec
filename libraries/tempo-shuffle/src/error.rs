//! Error types for shuffle state restoration

use thiserror::Error;

/// Shuffle errors
///
/// Navigation itself never fails. These only surface when a persisted
/// snapshot is turned back into a live shuffler.
#[derive(Debug, Error)]
pub enum ShuffleError {
    /// Snapshot fields contradict each other
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl ShuffleError {
    /// Create an invalid snapshot error
    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }
}

/// Result type for shuffle operations
pub type Result<T> = std::result::Result<T, ShuffleError>;
