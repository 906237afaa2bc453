//! Deterministic random number generation for decks and dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Forkable**: Create independent branches (one per game session, per test)
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use parlor::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // Fork an independent branch for a side simulation
//! let mut sim_rng = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(rng.gen_range(0..100u32), sim_rng.gen_range(0..100u32));
//!
//! // But forks are deterministic - same fork counter = same sequence
//! let mut rng2 = GameRng::new(42);
//! let mut sim_rng2 = rng2.fork();
//! // sim_rng and sim_rng2 would produce the same sequence
//! ```

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG used by every randomized deck and dice operation.
///
/// Wraps ChaCha8 for speed while maintaining high-quality randomness.
/// The seed-to-sequence mapping is fixed: a `GameRng` built from seed `s`
/// always produces the byte stream of `ChaCha8Rng::seed_from_u64(s)`,
/// so recorded seeds replay identically across runs and platforms.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// The chosen seed is retrievable via [`seed`](Self::seed) so a run
    /// can still be replayed after the fact.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random value in the given range.
    ///
    /// Accepts any `rand` range form: `0..52`, `1..=sides`, etc.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.inner.gen_range(range)
    }

    /// Generate a random boolean with given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Choose a random index with weighted probability.
    ///
    /// Weights do not need to sum to 1.0. Indices whose weight is zero are
    /// never returned. Returns `None` if weights are empty or all zero.
    pub fn choose_weighted(&mut self, weights: &[f32]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }

        let total: f32 = weights.iter().sum();
        if total <= 0.0 {
            return None;
        }

        let mut threshold = self.inner.gen::<f32>() * total;

        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            threshold -= weight;
            if threshold <= 0.0 {
                return Some(i);
            }
        }

        // Floating point edge case - fall back to the last positive weight
        weights.iter().rposition(|&w| w > 0.0)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<i32> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<i32> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_inclusive_range() {
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            let v: u32 = rng.gen_range(1..=6);
            assert!((1..=6).contains(&v));
        }
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = GameRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<i32> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<i32> = (0..10).map(|_| forked.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = GameRng::new(42);

        // Heavily weighted towards index 0
        let weights = vec![100.0, 0.0, 0.0];
        for _ in 0..10 {
            assert_eq!(rng.choose_weighted(&weights), Some(0));
        }

        // Empty weights
        assert_eq!(rng.choose_weighted(&[]), None);

        // All zero weights
        assert_eq!(rng.choose_weighted(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_choose_weighted_skips_zero_weights() {
        let mut rng = GameRng::new(42);
        let weights = vec![0.0, 1.0, 0.0, 1.0, 0.0];

        for _ in 0..1000 {
            let i = rng.choose_weighted(&weights).unwrap();
            assert!(i == 1 || i == 3);
        }
    }

    #[test]
    fn test_state_serialization() {
        let mut rng = GameRng::new(42);

        // Advance the RNG
        for _ in 0..100 {
            let _: i32 = rng.gen_range(0..1000);
        }

        // Save state
        let state = rng.state();

        // Continue generating
        let expected: Vec<i32> = (0..10).map(|_| rng.gen_range(0..1000)).collect();

        // Restore and verify
        let mut restored = GameRng::from_state(&state);
        let actual: Vec<i32> = (0..10).map(|_| restored.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
            fork_counter: 5,
        };

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();

        assert_eq!(state, deserialized);
    }

    #[test]
    fn test_state_preserves_fork_counter() {
        let mut rng = GameRng::new(42);

        let _ = rng.fork();
        let _ = rng.fork();
        let _ = rng.fork();

        let state = rng.state();
        assert_eq!(state.fork_counter, 3);

        let restored = GameRng::from_state(&state);
        assert_eq!(restored.fork_counter, 3);
    }
}
