//! Shuffle session - player integration adapter
//!
//! Wraps the pure shuffler with save-on-write persistence and an observer
//! callback. One session exists per playback session with shuffle enabled.

use crate::{
    config::ShuffleSettings,
    error::{Result, SessionError},
    events::ShuffleEvent,
    source::CollectionSource,
    store::StateStore,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempo_shuffle::{Direction, PlaylistShuffler, ShuffleSnapshot, ShuffleState};

/// Observer callback invoked after each state change
pub type Observer = Box<dyn FnMut(&ShuffleEvent)>;

/// Live shuffle session
///
/// Navigation never fails. Each mutation is written to the store right
/// away; a failed write is logged and playback carries on with the
/// in-memory state.
pub struct ShuffleSession<S: StateStore, R = StdRng> {
    shuffler: PlaylistShuffler<R>,
    store: S,
    key: String,
    observer: Option<Observer>,
}

impl<S: StateStore> ShuffleSession<S, StdRng> {
    /// Turn shuffle on for the player's current collection
    pub fn enable(
        source: &impl CollectionSource,
        store: S,
        settings: &ShuffleSettings,
    ) -> Result<Self> {
        Self::enable_with_rng(source, store, settings, StdRng::from_entropy())
    }

    /// Resume a persisted session for the player's current collection
    ///
    /// Returns `Ok(None)` when nothing is stored or the stored state belongs
    /// to a different collection (which is cleared).
    pub fn resume(
        source: &impl CollectionSource,
        store: S,
        settings: &ShuffleSettings,
    ) -> Result<Option<Self>> {
        Self::resume_with_rng(source, store, settings, StdRng::from_entropy())
    }

    /// Resume if possible, otherwise start a fresh shuffle
    pub fn enable_or_resume(
        source: &impl CollectionSource,
        store: S,
        settings: &ShuffleSettings,
    ) -> Result<Self> {
        Self::enable_or_resume_with_rng(source, store, settings, StdRng::from_entropy())
    }
}

impl<S: StateStore, R: Rng> ShuffleSession<S, R> {
    /// Turn shuffle on with a caller-supplied random source
    pub fn enable_with_rng(
        source: &impl CollectionSource,
        store: S,
        settings: &ShuffleSettings,
        rng: R,
    ) -> Result<Self> {
        settings.validate()?;
        let shuffler = PlaylistShuffler::with_rng(
            source.current_index(),
            source.collection_size(),
            settings.shuffler_config()?,
            rng,
        );

        let mut session = Self {
            shuffler,
            store,
            key: settings.storage_key.clone(),
            observer: None,
        };
        session.persist();

        tracing::info!(
            "Shuffle session started for {} items",
            source.collection_size()
        );
        Ok(session)
    }

    /// Resume a persisted session with a caller-supplied random source
    pub fn resume_with_rng(
        source: &impl CollectionSource,
        mut store: S,
        settings: &ShuffleSettings,
        rng: R,
    ) -> Result<Option<Self>> {
        settings.validate()?;
        let key = settings.storage_key.clone();

        let Some(snapshot) = load_snapshot(&mut store, &key, source.collection_size())? else {
            return Ok(None);
        };
        let shuffler = PlaylistShuffler::restore_with_rng(snapshot, rng)?;

        tracing::info!(
            "Shuffle session resumed at position {} of {}",
            shuffler.state().cursor(),
            shuffler.state().total_materialized()
        );
        Ok(Some(Self {
            shuffler,
            store,
            key,
            observer: None,
        }))
    }

    /// Resume if possible, otherwise start fresh
    ///
    /// Corrupt persisted state is logged, cleared and replaced.
    pub fn enable_or_resume_with_rng(
        source: &impl CollectionSource,
        mut store: S,
        settings: &ShuffleSettings,
        rng: R,
    ) -> Result<Self> {
        settings.validate()?;
        let key = settings.storage_key.clone();

        let snapshot = match load_snapshot(&mut store, &key, source.collection_size()) {
            Ok(snapshot) => snapshot,
            Err(e @ SessionError::Serialization(_)) => {
                tracing::warn!("Discarding unreadable shuffle state: {}", e);
                store.remove(&key)?;
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(snapshot) = snapshot {
            match ShuffleState::try_from(snapshot) {
                Ok(state) => {
                    return Ok(Self {
                        shuffler: PlaylistShuffler::from_state(state, rng),
                        store,
                        key,
                        observer: None,
                    });
                }
                Err(e) => {
                    tracing::warn!("Discarding invalid shuffle state: {}", e);
                    store.remove(&key)?;
                }
            }
        }

        Self::enable_with_rng(source, store, settings, rng)
    }

    /// Register the observer notified after each state change
    pub fn set_observer(&mut self, observer: impl FnMut(&ShuffleEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Skip forward; `None` means playback ended under the repeat policy
    pub fn next(&mut self, is_repeating: bool) -> Option<usize> {
        let before = self.shuffler.state().total_materialized();
        let result = self.shuffler.next(is_repeating);
        let after = self.shuffler.state().total_materialized();

        if after > before {
            self.emit(ShuffleEvent::ChunkMaterialized {
                start: before,
                end: after,
            });
        }
        match result {
            Some(index) => self.emit(ShuffleEvent::Navigated {
                index,
                direction: Direction::Forward,
            }),
            None if self.shuffler.state().ran_off_end() => self.emit(ShuffleEvent::PlaybackEnded),
            None => {}
        }

        self.persist();
        result
    }

    /// Skip backward
    pub fn previous(&mut self, is_repeating: bool) -> Option<usize> {
        let result = self.shuffler.previous(is_repeating);
        if let Some(index) = result {
            self.emit(ShuffleEvent::Navigated {
                index,
                direction: Direction::Backward,
            });
        }

        self.persist();
        result
    }

    /// Sync hook: the player reports that the new item actually started
    pub fn on_item_started_playing(&mut self, direction: Direction, is_repeating: bool) {
        self.shuffler.on_item_started_playing(direction, is_repeating);
        self.persist();
    }

    pub fn is_out_of_bounds(&self, pointer: isize) -> bool {
        self.shuffler.is_out_of_bounds(pointer)
    }

    pub fn has_more_chunks(&self) -> bool {
        self.shuffler.has_more_chunks()
    }

    pub fn current(&self) -> Option<usize> {
        self.shuffler.current()
    }

    pub fn state(&self) -> &ShuffleState {
        self.shuffler.state()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the current state to the store
    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.shuffler.snapshot())?;
        self.store.set(&self.key, &json)
    }

    /// Turn shuffle off: clear persisted state and hand the store back
    pub fn dispose(mut self) -> Result<S> {
        self.store.remove(&self.key)?;
        self.emit(ShuffleEvent::Disposed);
        tracing::info!("Shuffle session disposed");
        Ok(self.store)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to persist shuffle state: {}", e);
        }
    }

    fn emit(&mut self, event: ShuffleEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}

/// Read the snapshot stored under `key`, dropping it if it belongs to a
/// collection of a different size
fn load_snapshot<S: StateStore>(
    store: &mut S,
    key: &str,
    collection_size: usize,
) -> Result<Option<ShuffleSnapshot>> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let snapshot: ShuffleSnapshot = serde_json::from_str(&json)?;

    if snapshot.collection_size != collection_size {
        tracing::debug!(
            "Stored shuffle is for {} items, collection now has {}; clearing",
            snapshot.collection_size,
            collection_size
        );
        store.remove(key)?;
        return Ok(None);
    }

    Ok(Some(snapshot))
}
