//! Random generator construction.
//!
//! All randomness in this crate flows through explicit generator handles.
//! [`create_rng`] builds a seeded generator; [`derive_seed`] splits one base
//! seed into independent per-trial streams for parallel execution.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from operating-system entropy.
pub fn entropy_rng() -> StdRng {
    create_rng(rand::random())
}

/// Derives the seed of stream `index` from a base seed.
///
/// Uses the SplitMix64 finalizer so that neighbouring indices produce
/// uncorrelated seeds.
///
/// # References
///
/// Steele, Lea & Flood (2014), "Fast Splittable Pseudorandom Number Generators"
pub fn derive_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
