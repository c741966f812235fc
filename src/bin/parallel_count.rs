// Parallel count: fixed partitions across four threads with result slots
// sharing a cache line (near) or on separate lines (far), plus rayon.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::parallel_count::{self, SlotSpacing, SLOTS};
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;
    let seed = config.seed;

    let rows = run_sweep(
        &config,
        "parallel count",
        &["near", "far", "rayon"],
        io::stdout().lock(),
        |harness, n| {
            let data = parallel_count::random_bytes(n, seed);
            let mut slots = [0; SLOTS];

            let t_near = harness.measure_per(n, |_| {
                parallel_count::count_odd_partitioned(&data, &mut slots, SlotSpacing::Near)
            });
            let t_far = harness.measure_per(n, |_| {
                parallel_count::count_odd_partitioned(&data, &mut slots, SlotSpacing::Far)
            });
            let t_rayon = harness.measure_per(n, |_| parallel_count::count_odd_rayon(&data));

            Row::new(n, vec![t_near, t_far, t_rayon])
        },
    )?;

    eprintln!("{} {} sizes measured", "parallel count:".green().bold(), rows);
    Ok(())
}
