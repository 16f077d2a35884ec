//! What the session needs to know about the player's collection

/// Read-only view of the player's current collection
///
/// Read once when shuffle is enabled. The SDK adapters (MusicKit, Spotify,
/// YouTube) implement this on top of their own queue state.
pub trait CollectionSource {
    /// Index of the item playing right now, if any
    fn current_index(&self) -> Option<usize>;

    /// Number of addressable items in the collection
    fn collection_size(&self) -> usize;
}

/// Fixed collection snapshot
///
/// Useful when the caller already has both numbers in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCollection {
    pub current_index: Option<usize>,
    pub collection_size: usize,
}

impl StaticCollection {
    pub fn new(current_index: Option<usize>, collection_size: usize) -> Self {
        Self {
            current_index,
            collection_size,
        }
    }
}

impl CollectionSource for StaticCollection {
    fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    fn collection_size(&self) -> usize {
        self.collection_size
    }
}
