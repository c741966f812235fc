// Polymorphic containers: boxed trait objects in random order, the same
// boxes sorted by concrete type, and the segmented collection.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::poly;
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;
    let seed = config.seed;

    let rows = run_sweep(
        &config,
        "polymorphic containers",
        &["unsorted", "sorted", "poly_collection"],
        io::stdout().lock(),
        |harness, n| {
            let mut boxed = poly::boxed_counters(n, seed);
            let t_unsorted = harness.measure_per(n, |_| poly::sum_boxed(&boxed));
            poly::sort_by_kind(&mut boxed);
            let t_sorted = harness.measure_per(n, |_| poly::sum_boxed(&boxed));
            drop(boxed);

            let collection = poly::counter_collection(n, seed);
            let t_collection = harness.measure_per(n, |_| poly::sum_collection(&collection));

            Row::new(n, vec![t_unsorted, t_sorted, t_collection])
        },
    )?;

    eprintln!("{} {} sizes measured", "polymorphic containers:".green().bold(), rows);
    Ok(())
}
