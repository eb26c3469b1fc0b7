//! Seeded random selection over dimensions.
//!
//! Each selection stream gets its own ChaCha8Rng seeded from
//! `(seed + stream)`. Same seed -> same picks, always.

use rand::seq::index;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dimension::Dimension;
use crate::engine::CombinatorialEngine;
use crate::{Combination, Value};

/// Create a deterministic RNG for a seed and stream id.
pub fn selection_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed.wrapping_add(stream))
}

/// Pick one value of `dimension` uniformly.
pub fn pick_value<'a, R: Rng + ?Sized>(dimension: &'a Dimension, rng: &mut R) -> &'a Value {
    &dimension.values()[rng.gen_range(0..dimension.len())]
}

/// One uniformly chosen value per dimension. Filters are not consulted.
pub fn random_combination<R: Rng + ?Sized>(dimensions: &[Dimension], rng: &mut R) -> Combination {
    let mut combination = Combination::new();
    for dimension in dimensions {
        combination.insert(dimension.name(), pick_value(dimension, rng).clone());
    }
    combination
}

/// Draw up to `count` distinct accepted combinations, in enumeration order.
///
/// Resets the engine and drains it in its current mode, honouring the
/// filter; the engine is left reset afterwards.
pub fn sample_combinations(
    engine: &mut CombinatorialEngine,
    count: usize,
    seed: u64,
) -> Vec<Combination> {
    engine.reset();
    let all: Vec<Combination> = engine.iter().collect();
    engine.reset();

    if count >= all.len() {
        return all;
    }

    let mut rng = selection_rng(seed, 0);
    let mut picked = index::sample(&mut rng, all.len(), count).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| all[i].clone()).collect()
}
