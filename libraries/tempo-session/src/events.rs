//! Shuffle Events
//!
//! Emitted to the session observer after each state change so the UI can
//! follow along without polling:
//! - Navigation results (including the end-of-playback sentinel)
//! - Chunk materialization
//! - Disposal

use serde::{Deserialize, Serialize};
use tempo_shuffle::Direction;

/// Events emitted by a shuffle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleEvent {
    /// `next()` or `previous()` resolved to a collection index
    Navigated {
        /// Collection index now under the cursor
        index: usize,
        /// Which way the user skipped
        direction: Direction,
    },

    /// A new chunk was appended to the order
    ChunkMaterialized {
        /// First collection index of the chunk
        start: usize,
        /// One past the last collection index of the chunk
        end: usize,
    },

    /// `next()` ran off the end without repeat
    PlaybackEnded,

    /// Shuffle was turned off and persisted state cleared
    Disposed,
}
