//! Chunk construction
//!
//! A chunk is a bounded block of collection indices, permuted as a unit.
//! The first chunk covers `0..min(chunk_size, collection_size)` with the
//! currently playing index pinned to the front; every later chunk covers the
//! next unmaterialized range and is fully shuffled.

use crate::shuffle::shuffle;
use rand::Rng;
use std::num::NonZeroUsize;

/// Build the first chunk of a new shuffle order
///
/// When `start_index` falls inside the chunk (and the collection has more
/// than one item) it is moved to position 0 and only the remaining slots are
/// shuffled. A start index outside the chunk means "no pinning": the whole
/// chunk is shuffled and no element is guaranteed to come first.
pub fn build_initial_chunk<R: Rng + ?Sized>(
    start_index: Option<usize>,
    collection_size: usize,
    chunk_size: NonZeroUsize,
    rng: &mut R,
) -> Vec<usize> {
    let size = chunk_size.get().min(collection_size);
    let mut chunk: Vec<usize> = (0..size).collect();

    // Single-item collections never need randomization
    if collection_size <= 1 {
        return chunk;
    }

    match start_index.filter(|&start| start < size) {
        Some(start) => {
            // Position `start` holds value `start` in the identity sequence
            chunk.swap(0, start);
            shuffle(&mut chunk[1..], rng);
        }
        None => {
            if let Some(start) = start_index {
                tracing::debug!(
                    "Start index {} lies beyond the first chunk ({} items), not pinning",
                    start,
                    size
                );
            }
            shuffle(&mut chunk, rng);
        }
    }

    chunk
}

/// Build the continuation chunk after `already_materialized` indices
///
/// Covers `already_materialized..already_materialized + size` where size is
/// bounded by both the chunk size and what remains of the collection.
/// Returns an empty chunk once the collection is fully materialized.
pub fn build_next_chunk<R: Rng + ?Sized>(
    already_materialized: usize,
    collection_size: usize,
    chunk_size: NonZeroUsize,
    rng: &mut R,
) -> Vec<usize> {
    let remaining = collection_size.saturating_sub(already_materialized);
    let size = chunk_size.get().min(remaining);

    let mut chunk: Vec<usize> = (already_materialized..already_materialized + size).collect();
    shuffle(&mut chunk, rng);
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn sorted(mut chunk: Vec<usize>) -> Vec<usize> {
        chunk.sort_unstable();
        chunk
    }

    #[test]
    fn initial_chunk_pins_start_index() {
        let mut rng = StdRng::seed_from_u64(3);
        let chunk = build_initial_chunk(Some(3), 7, size(100), &mut rng);

        assert_eq!(chunk.len(), 7);
        assert_eq!(chunk[0], 3);
        assert_eq!(sorted(chunk), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn initial_chunk_limited_to_chunk_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let chunk = build_initial_chunk(Some(10), 250, size(100), &mut rng);

        assert_eq!(chunk.len(), 100);
        assert_eq!(chunk[0], 10);
        assert_eq!(sorted(chunk), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn initial_chunk_start_beyond_chunk_is_not_pinned() {
        let mut rng = StdRng::seed_from_u64(3);
        let chunk = build_initial_chunk(Some(150), 250, size(100), &mut rng);

        assert_eq!(chunk.len(), 100);
        assert!(!chunk.contains(&150));
        assert_eq!(sorted(chunk), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn initial_chunk_without_start_is_fully_shuffled() {
        let mut rng = StdRng::seed_from_u64(11);
        let chunk = build_initial_chunk(None, 30, size(100), &mut rng);

        assert_eq!(sorted(chunk.clone()), (0..30).collect::<Vec<_>>());
        assert_ne!(chunk, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn single_item_collection() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(build_initial_chunk(Some(0), 1, size(100), &mut rng), vec![0]);
        assert_eq!(build_initial_chunk(None, 1, size(100), &mut rng), vec![0]);
    }

    #[test]
    fn empty_collection() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(build_initial_chunk(Some(0), 0, size(100), &mut rng).is_empty());
        assert!(build_next_chunk(0, 0, size(100), &mut rng).is_empty());
    }

    #[test]
    fn chunk_size_one_keeps_start_only() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(build_initial_chunk(Some(0), 5, size(1), &mut rng), vec![0]);
    }

    #[test]
    fn next_chunk_covers_following_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let chunk = build_next_chunk(100, 250, size(100), &mut rng);
        assert_eq!(sorted(chunk), (100..200).collect::<Vec<_>>());
    }

    #[test]
    fn next_chunk_truncated_at_collection_end() {
        let mut rng = StdRng::seed_from_u64(5);
        let chunk = build_next_chunk(200, 250, size(100), &mut rng);
        assert_eq!(sorted(chunk), (200..250).collect::<Vec<_>>());
    }

    #[test]
    fn next_chunk_after_full_materialization_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);
        assert!(build_next_chunk(250, 250, size(100), &mut rng).is_empty());
        assert!(build_next_chunk(300, 250, size(100), &mut rng).is_empty());
    }
}
