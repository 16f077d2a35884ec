//! Core types for shuffle navigation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Default number of indices materialized per chunk
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Exhaustion state of the materialized order
///
/// Derived from the cursor position after each track change. Serialized
/// with the names the player front end persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// The cursor has a successor inside the materialized order
    #[serde(rename = "CAN_CONTINUE_CHUNK")]
    MoreInChunk,

    /// The cursor sits on the last materialized slot, more chunks can be built
    #[serde(rename = "HAS_ENDED_AND_MORE_CHUNKS")]
    ChunkExhaustedMoreAvailable,

    /// The cursor sits on the last slot and the collection is fully materialized
    #[serde(rename = "HAS_ENDED_NO_CHUNKS")]
    ChunkExhaustedNoneLeft,
}

impl Phase {
    /// Persisted name of this phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::MoreInChunk => "CAN_CONTINUE_CHUNK",
            Phase::ChunkExhaustedMoreAvailable => "HAS_ENDED_AND_MORE_CHUNKS",
            Phase::ChunkExhaustedNoneLeft => "HAS_ENDED_NO_CHUNKS",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the track change that just happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Skipped (or advanced) to the next item
    Forward,

    /// Went back to the previous item
    Backward,
}

/// Per-instance shuffler configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShufflerConfig {
    /// Maximum indices materialized per chunk (default: 100)
    pub chunk_size: NonZeroUsize,
}

impl ShufflerConfig {
    /// Config with a custom chunk size
    pub fn with_chunk_size(chunk_size: NonZeroUsize) -> Self {
        Self { chunk_size }
    }
}

impl Default for ShufflerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ShufflerConfig::default();
        assert_eq!(config.chunk_size.get(), 100);
    }

    #[test]
    fn display_matches_persisted_name() {
        for phase in [
            Phase::MoreInChunk,
            Phase::ChunkExhaustedMoreAvailable,
            Phase::ChunkExhaustedNoneLeft,
        ] {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase));
        }
    }

    #[test]
    fn unknown_phase_is_rejected() {
        assert!(serde_json::from_str::<Phase>("\"PAUSED\"").is_err());
    }

    #[test]
    fn phase_serializes_with_persisted_names() {
        let json = serde_json::to_string(&Phase::ChunkExhaustedMoreAvailable).unwrap();
        assert_eq!(json, "\"HAS_ENDED_AND_MORE_CHUNKS\"");
    }
}
