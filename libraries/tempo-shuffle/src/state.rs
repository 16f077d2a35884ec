//! Shuffle state and its persisted snapshot
//!
//! `ShuffleState` is the in-memory state machine data. `ShuffleSnapshot` is
//! the JSON shape stored by the player so a reload can resume mid-shuffle.

use crate::error::{Result, ShuffleError};
use crate::types::{Phase, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Live shuffle state
///
/// Owned by exactly one player at a time. `order` only ever grows by whole
/// chunks and always holds a permutation of `0..order.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleState {
    pub(crate) collection_size: usize,
    pub(crate) chunk_size: NonZeroUsize,
    pub(crate) start_index: Option<usize>,
    pub(crate) order: Vec<usize>,
    pub(crate) cursor: usize,
    pub(crate) phase: Phase,
    pub(crate) ran_off_end: bool,
    pub(crate) completed: bool,
}

impl ShuffleState {
    /// Total number of addressable items in the collection
    pub fn collection_size(&self) -> usize {
        self.collection_size
    }

    /// Maximum indices materialized per chunk
    pub fn chunk_size(&self) -> NonZeroUsize {
        self.chunk_size
    }

    /// Index that was playing when shuffle was enabled, if it was pinned
    pub fn start_index(&self) -> Option<usize> {
        self.start_index
    }

    /// Materialized traversal order
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Position in `order` of the item currently playing
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Phase as of the last `on_item_started_playing` call
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Count of indices generated so far across all chunks
    pub fn total_materialized(&self) -> usize {
        self.order.len()
    }

    /// Whether the last `next()` ran off the end without repeat
    pub fn ran_off_end(&self) -> bool {
        self.ran_off_end
    }

    /// Opaque completion flag carried through persistence
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Whether indices beyond the materialized order remain
    pub fn has_more_chunks(&self) -> bool {
        self.total_materialized() < self.collection_size
    }

    /// Compute the phase from the current cursor position
    pub(crate) fn derive_phase(&self) -> Phase {
        if self.cursor + 1 < self.order.len() {
            Phase::MoreInChunk
        } else if self.has_more_chunks() {
            Phase::ChunkExhaustedMoreAvailable
        } else {
            Phase::ChunkExhaustedNoneLeft
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE.get()
}

/// Persisted shuffle state
///
/// `start_index` uses `-1` for "no pinning". `cursor` may be `-1` or
/// `order.len()` in payloads written by older clients; both are normalized
/// on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleSnapshot {
    pub start_index: i64,
    pub cursor: i64,
    pub order: Vec<usize>,
    pub collection_size: usize,
    pub total_materialized: usize,
    pub phase: Phase,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub ran_off_end: bool,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl From<&ShuffleState> for ShuffleSnapshot {
    fn from(state: &ShuffleState) -> Self {
        Self {
            start_index: state.start_index.map_or(-1, |index| index as i64),
            cursor: state.cursor as i64,
            order: state.order.clone(),
            collection_size: state.collection_size,
            total_materialized: state.total_materialized(),
            phase: state.phase,
            completed: state.completed,
            ran_off_end: state.ran_off_end,
            chunk_size: state.chunk_size.get(),
        }
    }
}

impl TryFrom<ShuffleSnapshot> for ShuffleState {
    type Error = ShuffleError;

    fn try_from(snapshot: ShuffleSnapshot) -> Result<Self> {
        let chunk_size = NonZeroUsize::new(snapshot.chunk_size)
            .ok_or_else(|| ShuffleError::invalid_snapshot("chunk size must be positive"))?;

        let len = snapshot.order.len();
        if snapshot.total_materialized != len {
            return Err(ShuffleError::InvalidSnapshot(format!(
                "totalMaterialized {} does not match order length {}",
                snapshot.total_materialized, len
            )));
        }
        if len > snapshot.collection_size {
            return Err(ShuffleError::InvalidSnapshot(format!(
                "order length {} exceeds collection size {}",
                len, snapshot.collection_size
            )));
        }

        // Chunks cover contiguous ranges from 0, so the order must be a
        // permutation of 0..len
        let mut seen = vec![false; len];
        for &index in &snapshot.order {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(ShuffleError::InvalidSnapshot(format!(
                        "index {} appears more than once",
                        index
                    )))
                }
                None => {
                    return Err(ShuffleError::InvalidSnapshot(format!(
                        "index {} lies outside the materialized range 0..{}",
                        index, len
                    )))
                }
            }
        }

        // A cursor one past the order is a transient written mid-skip: with
        // chunks left it stays on the last slot so the next skip materializes
        let (cursor, ran_off_end) = match snapshot.cursor {
            -1 => (0, snapshot.ran_off_end),
            c if c >= 0 && (c as usize) < len => (c as usize, snapshot.ran_off_end),
            c if c >= 0 && c as usize == len && len > 0 && len < snapshot.collection_size => {
                (len - 1, false)
            }
            c if c >= 0 && c as usize == len => (0, len > 0),
            c => {
                return Err(ShuffleError::InvalidSnapshot(format!(
                    "cursor {} outside -1..={}",
                    c, len
                )))
            }
        };

        let start_index = usize::try_from(snapshot.start_index)
            .ok()
            .filter(|&start| start < snapshot.collection_size);

        Ok(Self {
            collection_size: snapshot.collection_size,
            chunk_size,
            start_index,
            order: snapshot.order,
            cursor,
            phase: snapshot.phase,
            ran_off_end,
            completed: snapshot.completed,
        })
    }
}
