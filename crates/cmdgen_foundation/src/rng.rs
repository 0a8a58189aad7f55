//! Seeded randomness.
//!
//! Every random choice in generation and binding draws from a [`GenRng`], so a
//! seed fully determines the produced tasks.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The random source used throughout generation.
pub type GenRng = ChaCha8Rng;

/// Creates a generator from a fixed seed.
#[must_use]
pub fn seeded(seed: u64) -> GenRng {
    GenRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the operating system.
#[must_use]
pub fn from_entropy() -> GenRng {
    GenRng::from_entropy()
}

/// Picks an index in `0..len` uniformly. Returns `None` when `len` is zero.
pub fn select_uniform<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}

/// Picks one element uniformly.
pub fn random_pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates).
pub fn shuffle_copy<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    copy.shuffle(rng);
    copy
}
