// Linear traversal: contiguous Vec vs linked list vs linked list whose nodes
// are scattered in memory.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::seeded_rng;
use layout_bench::workloads::traversal::{self, LinkedList};
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;
    let mut rng = seeded_rng(config.seed);

    let rows = run_sweep(
        &config,
        "linear traversal",
        &["vector", "list", "shuffled list"],
        io::stdout().lock(),
        |harness, n| {
            let v = traversal::iota(n);
            let t_vec = harness.measure_per(n, |_| traversal::sum_slice(&v));
            drop(v);

            let list = LinkedList::sequential(n);
            let t_list = harness.measure_per(n, |_| list.sum());
            drop(list);

            let shuffled = LinkedList::shuffled(n, &mut rng);
            let t_shuffled = harness.measure_per(n, |_| shuffled.sum());

            Row::new(n, vec![t_vec, t_list, t_shuffled])
        },
    )?;

    eprintln!("{} {} sizes measured", "linear traversal:".green().bold(), rows);
    Ok(())
}
