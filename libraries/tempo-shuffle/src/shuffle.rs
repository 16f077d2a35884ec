//! Permutation primitive
//!
//! Uniform in-place Fisher-Yates over collection indices. Pinning the
//! currently playing index is the chunk builder's job, not this one's.

use rand::seq::SliceRandom;
use rand::Rng;

/// Shuffle a sequence of indices in place
///
/// Walks from the last slot down to slot 1, swapping each with a uniformly
/// chosen slot at or before it, so every permutation is equally likely.
/// Sequences of length 0 or 1 are left untouched.
pub fn shuffle<R: Rng + ?Sized>(sequence: &mut [usize], rng: &mut R) {
    if sequence.len() <= 1 {
        return;
    }
    sequence.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn empty_sequence_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sequence: Vec<usize> = vec![];
        shuffle(&mut sequence, &mut rng);
        assert!(sequence.is_empty());
    }

    #[test]
    fn single_element_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut sequence = vec![42];
        shuffle(&mut sequence, &mut rng);
        assert_eq!(sequence, vec![42]);
    }

    #[test]
    fn shuffle_preserves_all_indices() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut sequence: Vec<usize> = (0..50).collect();
        shuffle(&mut sequence, &mut rng);

        let mut sorted = sequence.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_changes_order() {
        let mut rng = StdRng::seed_from_u64(99);
        let original: Vec<usize> = (0..20).collect();
        let mut sequence = original.clone();
        shuffle(&mut sequence, &mut rng);

        // 1 in 20! chance of a fixed point for the whole sequence
        assert_ne!(sequence, original);
    }

    #[test]
    fn every_permutation_equally_likely() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        let trials = 6000;

        for _ in 0..trials {
            let mut sequence = vec![0, 1, 2];
            shuffle(&mut sequence, &mut rng);
            *counts.entry(sequence).or_default() += 1;
        }

        // 3! permutations, ~1000 each; the bounds sit > 6 standard deviations out
        assert_eq!(counts.len(), 6, "Missing permutations: {:?}", counts);
        for (permutation, count) in &counts {
            assert!(
                (800..=1200).contains(count),
                "Permutation {:?} appeared {} times",
                permutation,
                count
            );
        }
    }
}
