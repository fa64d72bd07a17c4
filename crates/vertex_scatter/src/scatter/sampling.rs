//! Random draws used by the engine: density subsampling without replacement and uniform
//! values within closed ranges.
//!
//! Every helper takes the generator as a parameter so callers can pass a seeded
//! [`rand::rngs::StdRng`] in tests and an unseeded one in production.
use rand::seq::index;
use rand::{Rng, RngExt};

/// Number of targets populated for `len` targets at `density` percent, rounded down.
#[inline]
pub fn subsample_count(len: usize, density: u8) -> usize {
    ((len as u128 * u128::from(density)) / 100) as usize
}

/// Uniform value in `[min, max]`. Collapses to `min` when the range is degenerate.
#[inline]
pub(crate) fn uniform_in<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Picks `amount` distinct indices out of `0..len`, each index equally likely.
///
/// `amount` is capped at `len`.
pub fn sample_indices<R: Rng + ?Sized>(len: usize, amount: usize, rng: &mut R) -> Vec<usize> {
    index::sample(rng, len, amount.min(len)).into_vec()
}

/// Draws `amount` elements of `items` without replacement.
pub fn sample_without_replacement<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    amount: usize,
    rng: &mut R,
) -> Vec<T> {
    sample_indices(items.len(), amount, rng)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}
