//! Positional band sampling over sorted key lists.
//!
//! Rather than comparing every common product, a bounded sample is drawn
//! from three contiguous bands of the sorted key list: the first fifth, the
//! middle fifth, and the last fifth. Keys sort roughly by identity, so the
//! bands spot-check different regions of the catalog.

use std::collections::HashSet;
use std::hash::Hash;

use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of index choices, injectable so tests can fix the selection.
pub trait Chooser {
    /// Returns `min(take, pool)` distinct indices in `[0, pool)`.
    fn choose(&mut self, pool: usize, take: usize) -> Vec<usize>;
}

/// [`Chooser`] backed by a rand RNG. Tests seed it for reproducibility.
pub struct RngChooser<R: Rng> {
    rng: R,
}

impl<R: Rng> RngChooser<R> {
    pub fn new(rng: R) -> Self {
        RngChooser { rng }
    }
}

impl Default for RngChooser<ThreadRng> {
    fn default() -> Self {
        RngChooser::new(rand::thread_rng())
    }
}

impl<R: Rng> Chooser for RngChooser<R> {
    fn choose(&mut self, pool: usize, take: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, pool, take.min(pool)).into_vec()
    }
}

/// Draws up to `per_band` keys from each of the three bands.
pub struct Sampler<C: Chooser = RngChooser<ThreadRng>> {
    per_band: usize,
    chooser: C,
}

impl Sampler {
    /// Sampler with a thread-local RNG.
    pub fn new(per_band: usize) -> Self {
        Sampler::with_chooser(per_band, RngChooser::default())
    }
}

impl<C: Chooser> Sampler<C> {
    pub fn with_chooser(per_band: usize, chooser: C) -> Self {
        Sampler { per_band, chooser }
    }

    /// Samples without replacement within each band. Bands shorter than
    /// `per_band` yield all of their keys; a key landing in more than one
    /// band is kept once, at its first position.
    pub fn sample<T: Clone + Eq + Hash>(&mut self, keys: &[T]) -> Vec<T> {
        let n = keys.len();
        if n == 0 {
            return Vec::new();
        }

        let mut picked = Vec::new();
        let mut seen = HashSet::new();
        for (lo, hi) in bands(n) {
            let pool = &keys[lo..hi];
            if pool.is_empty() {
                continue;
            }
            for index in self.chooser.choose(pool.len(), self.per_band) {
                let key = &pool[index];
                if seen.insert(key.clone()) {
                    picked.push(key.clone());
                }
            }
        }
        picked
    }
}

/// Band bounds over a list of length `n`: first, middle, and last fifth.
fn bands(n: usize) -> [(usize, usize); 3] {
    [(0, n / 5), (2 * n / 5, 3 * n / 5), (4 * n / 5, n)]
}
