//! Tempo - Playlist Shuffling
//!
//! Chunked, space-optimized shuffle order for the ambient music player.
//!
//! This crate provides:
//! - Unbiased Fisher-Yates permutation of index ranges
//! - Lazy chunk materialization (default 100 indices per chunk)
//! - Pinning of the currently playing item to the front of the order
//! - Next/previous navigation with repeat wrap and end detection
//! - A serializable snapshot for resuming after a reload
//!
//! # Architecture
//!
//! `tempo-shuffle` is a pure state machine:
//! - No storage, no globals, no async
//! - Randomness is injected (`PlaylistShuffler::with_rng`) so tests can seed it
//! - Persistence and observers live in `tempo-session`
//!
//! # Example
//!
//! ```rust
//! use tempo_shuffle::{PlaylistShuffler, ShufflerConfig};
//!
//! // Track 3 of 7 is playing when the user turns shuffle on
//! let mut shuffler = PlaylistShuffler::new(Some(3), 7, ShufflerConfig::default());
//! assert_eq!(shuffler.current(), Some(3));
//!
//! // Six skips visit every other track exactly once
//! for _ in 0..6 {
//!     assert!(shuffler.next(false).is_some());
//! }
//!
//! // Without repeat, the seventh skip ends playback
//! assert_eq!(shuffler.next(false), None);
//! ```

mod chunk;
mod error;
mod shuffle;
mod shuffler;
mod state;
pub mod types;

// Public exports
pub use chunk::{build_initial_chunk, build_next_chunk};
pub use error::{Result, ShuffleError};
pub use shuffle::shuffle;
pub use shuffler::PlaylistShuffler;
pub use state::{ShuffleSnapshot, ShuffleState};
pub use types::{Direction, Phase, ShufflerConfig, DEFAULT_CHUNK_SIZE};
