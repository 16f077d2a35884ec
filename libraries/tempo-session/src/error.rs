//! Error types for shuffle sessions

use tempo_shuffle::ShuffleError;
use thiserror::Error;

/// Result type alias using `SessionError`
pub type Result<T> = std::result::Result<T, SessionError>;

/// Session errors
///
/// Raised by storage, settings and snapshot decoding. Navigation on a live
/// session never returns one of these.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Persisted state could not be turned back into a shuffler
    #[error("Shuffle state error: {0}")]
    Shuffle(#[from] ShuffleError),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SessionError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<config::ConfigError> for SessionError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
