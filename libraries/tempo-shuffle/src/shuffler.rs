//! Shuffle navigation state machine
//!
//! Sequences chunks, tracks the cursor and answers next/previous requests
//! with repeat-wrap and end-of-collection handling.

use crate::chunk::{build_initial_chunk, build_next_chunk};
use crate::error::Result;
use crate::state::{ShuffleSnapshot, ShuffleState};
use crate::types::{Direction, Phase, ShufflerConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chunked playlist shuffler
///
/// Navigation never fails: running off an end without repeat yields `None`
/// and every other case resolves to a collection index.
///
/// ```text
///            next()                      next() at last slot
/// [3] 0 5 1 ───────► 3 [0] 5 1  ...  ──────────────────────► materialize
///  ^ cursor                          more chunks? append & advance
///                                    repeat?      wrap to slot 0
///                                    otherwise    None, pre-arm slot 0
/// ```
#[derive(Debug, Clone)]
pub struct PlaylistShuffler<R = StdRng> {
    state: ShuffleState,
    rng: R,
}

impl PlaylistShuffler<StdRng> {
    /// Create a shuffler seeded from OS entropy
    ///
    /// `start_index` is the item playing when shuffle was turned on. It is
    /// pinned to the front of the order when it lies inside the first chunk.
    pub fn new(start_index: Option<usize>, collection_size: usize, config: ShufflerConfig) -> Self {
        Self::with_rng(start_index, collection_size, config, StdRng::from_entropy())
    }

    /// Restore a shuffler from persisted state
    pub fn from_snapshot(snapshot: ShuffleSnapshot) -> Result<Self> {
        Self::restore_with_rng(snapshot, StdRng::from_entropy())
    }
}

impl<R: Rng> PlaylistShuffler<R> {
    /// Create a shuffler with a caller-supplied random source
    pub fn with_rng(
        start_index: Option<usize>,
        collection_size: usize,
        config: ShufflerConfig,
        mut rng: R,
    ) -> Self {
        let order =
            build_initial_chunk(start_index, collection_size, config.chunk_size, &mut rng);

        let pinned = start_index.filter(|&start| collection_size > 1 && start < order.len());

        let mut state = ShuffleState {
            collection_size,
            chunk_size: config.chunk_size,
            start_index: pinned,
            order,
            cursor: 0,
            phase: Phase::MoreInChunk,
            ran_off_end: false,
            completed: false,
        };
        state.phase = state.derive_phase();

        tracing::debug!(
            "Shuffle enabled: {} items, chunk size {}, first chunk {} items, pinned {:?}",
            collection_size,
            config.chunk_size,
            state.order.len(),
            pinned
        );

        Self { state, rng }
    }

    /// Restore persisted state with a caller-supplied random source
    pub fn restore_with_rng(snapshot: ShuffleSnapshot, rng: R) -> Result<Self> {
        let state = ShuffleState::try_from(snapshot)?;
        Ok(Self::from_state(state, rng))
    }

    /// Wrap an already validated state
    pub fn from_state(state: ShuffleState, rng: R) -> Self {
        tracing::debug!(
            "Shuffle restored: cursor {} of {} materialized ({} total)",
            state.cursor,
            state.order.len(),
            state.collection_size
        );
        Self { state, rng }
    }

    /// Advance to the next item
    ///
    /// Returns `None` when the collection is empty, or when the order is
    /// fully materialized, the cursor sits on the last slot and repeat is
    /// off. In that case the cursor is reset to slot 0 and the following
    /// call advances from there like any other.
    pub fn next(&mut self, is_repeating: bool) -> Option<usize> {
        if self.state.order.is_empty() {
            return None;
        }

        // Only `previous()` acts on the flag
        self.state.ran_off_end = false;

        // Derived afresh: the cached phase may lag if the player skipped
        // several times before a track started
        match self.state.derive_phase() {
            Phase::MoreInChunk => self.state.cursor += 1,
            Phase::ChunkExhaustedMoreAvailable => {
                self.materialize_next_chunk();
                self.state.cursor += 1;
            }
            Phase::ChunkExhaustedNoneLeft if is_repeating => {
                tracing::trace!("Repeat: wrapping to start of shuffle order");
                self.state.cursor = 0;
            }
            Phase::ChunkExhaustedNoneLeft => {
                tracing::debug!("Shuffle order exhausted, pre-arming replay from start");
                self.state.cursor = 0;
                self.state.ran_off_end = true;
                return None;
            }
        }

        self.current()
    }

    /// Step back to the previous item
    ///
    /// Clamps at slot 0 without repeat and wraps to the last materialized
    /// slot with repeat. Directly after `next()` ran off the end this goes
    /// to the last slot, the item that just finished.
    pub fn previous(&mut self, is_repeating: bool) -> Option<usize> {
        let len = self.state.order.len();
        if len == 0 {
            return None;
        }

        if self.state.ran_off_end {
            self.state.ran_off_end = false;
            self.state.cursor = len - 1;
        } else if self.state.cursor == 0 {
            if is_repeating {
                self.state.cursor = len - 1;
            }
        } else {
            self.state.cursor -= 1;
        }

        self.current()
    }

    /// Sync hook called by the player once a new item actually starts
    ///
    /// Recomputes the cached phase so the persisted state reflects whether
    /// the next skip will stay in the chunk, materialize, or end.
    pub fn on_item_started_playing(&mut self, direction: Direction, is_repeating: bool) {
        let phase = self.state.derive_phase();
        if phase != self.state.phase {
            tracing::trace!(
                "Phase {} -> {} ({:?}, repeat: {})",
                self.state.phase,
                phase,
                direction,
                is_repeating
            );
        }
        self.state.phase = phase;
    }

    /// Whether `pointer` falls outside the materialized order
    pub fn is_out_of_bounds(&self, pointer: isize) -> bool {
        pointer < 0 || pointer as usize >= self.state.order.len()
    }

    /// Whether the cursor falls outside the materialized order
    pub fn cursor_out_of_bounds(&self) -> bool {
        self.state.cursor >= self.state.order.len()
    }

    /// Whether indices beyond the materialized order remain
    pub fn has_more_chunks(&self) -> bool {
        self.state.has_more_chunks()
    }

    /// Collection index under the cursor
    pub fn current(&self) -> Option<usize> {
        self.state.order.get(self.state.cursor).copied()
    }

    /// Read-only view of the state
    pub fn state(&self) -> &ShuffleState {
        &self.state
    }

    /// Persistable copy of the state
    pub fn snapshot(&self) -> ShuffleSnapshot {
        ShuffleSnapshot::from(&self.state)
    }

    fn materialize_next_chunk(&mut self) {
        let already = self.state.order.len();
        let chunk = build_next_chunk(
            already,
            self.state.collection_size,
            self.state.chunk_size,
            &mut self.rng,
        );
        tracing::debug!(
            "Materialized chunk {}..{} of {}",
            already,
            already + chunk.len(),
            self.state.collection_size
        );
        self.state.order.extend(chunk);
    }
}
