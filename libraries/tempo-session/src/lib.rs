//! Tempo - Shuffle Sessions
//!
//! Connects the pure `tempo-shuffle` state machine to a music player.
//!
//! This crate provides:
//! - Save-on-write persistence to an opaque key/value store
//! - Resume after reload, discarding state for a changed collection
//! - Observer callbacks for UI synchronization
//! - Settings from `tempo.toml` and `TEMPO_*` environment variables
//!
//! # Example
//!
//! ```rust
//! use tempo_session::{MemoryStore, ShuffleSession, ShuffleSettings, StaticCollection};
//! use tempo_shuffle::Direction;
//!
//! // Track 4 of 20 is playing when shuffle is turned on
//! let player = StaticCollection::new(Some(4), 20);
//! let settings = ShuffleSettings::default();
//!
//! let mut session = ShuffleSession::enable(&player, MemoryStore::new(), &settings).unwrap();
//! assert_eq!(session.current(), Some(4));
//!
//! // User skips; the player confirms once the new track starts
//! let next = session.next(false);
//! assert!(next.is_some());
//! session.on_item_started_playing(Direction::Forward, false);
//!
//! // Shuffle off clears persisted state
//! let store = session.dispose().unwrap();
//! assert!(store.is_empty());
//! ```

pub mod config;
mod error;
mod events;
mod session;
mod source;
mod store;

// Public exports
pub use crate::config::ShuffleSettings;
pub use error::{Result, SessionError};
pub use events::ShuffleEvent;
pub use session::{Observer, ShuffleSession};
pub use source::{CollectionSource, StaticCollection};
pub use store::{FileStore, MemoryStore, StateStore};
