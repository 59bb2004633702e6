//! Per-parameter random streams.
//!
//! A random suite seeds one ChaCha8 generator and gives every parameter
//! position its own ChaCha stream of it. A parameter's draws therefore
//! depend only on the seed and its position, not on how many parameters
//! follow it or how much randomness they consume.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator for parameter `param` under `seed`.
pub fn param_rng(seed: u64, param: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(param as u64);
    rng
}

/// One generator per parameter position, in order.
pub fn param_rngs(seed: u64, params: usize) -> Vec<ChaCha8Rng> {
    (0..params).map(|param| param_rng(seed, param)).collect()
}
