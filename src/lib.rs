//! # Data Layout Benchmarks
//!
//! Micro-benchmarks measuring how data layout and dispatch strategy affect
//! traversal speed, plus the container they motivate.
//!
//! ## Modules
//!
//! 1. **poly** - Segmented polymorphic collection: one contiguous segment per
//!    concrete type, traversed through a shared trait object interface
//! 2. **harness** - Trimmed-mean timing with pause/resume support
//! 3. **sweep** - Growing input-size schedule and semicolon-separated reports
//! 4. **workloads** - The measured data structures and traversals
//! 5. **config** / **cli** - TOML configuration and command-line overrides
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo run --release --bin aos_vs_soa
//! cargo run --release --bin compact_aos_vs_soa
//! cargo run --release --bin linear_traversal
//! cargo run --release --bin matrix_sum
//! cargo run --release --bin member_order
//! cargo run --release --bin parallel_count
//! cargo run --release --bin poly_containers -- --n1 1000000 --config bench.toml
//! cargo bench
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
pub mod poly;
pub mod sweep;
pub mod workloads;

pub use error::BenchError;
pub use poly::{Collection, Variant};
