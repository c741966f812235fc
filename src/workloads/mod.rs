//! The data structures and traversals each benchmark binary measures.
//!
//! Builders and measured operations are plain functions so the binaries, the
//! criterion benches and the tests all exercise the same code.

pub mod matrix;
pub mod member_order;
pub mod parallel_count;
pub mod particles;
pub mod poly;
pub mod traversal;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic generator shared by every workload.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
