// Member ordering: ordered-set lookups over records with hot fields placed
// before or after a cold payload.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::member_order::{self, HotFirst, HotLast};
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);

    let mut defaults = BenchConfig::default();
    defaults.sweep.n0 = 1_000_000;
    let config = args.resolve(defaults)?;
    let seed = config.seed;

    let rows = run_sweep(&config, "member_order", &["value1", "value2"], io::stdout().lock(), |harness, n| {
        let set = member_order::build_set::<HotFirst>(n);
        let t_first = harness.measure_per(n, |_| member_order::lookup_sum(&set, n, seed));
        drop(set);

        let set = member_order::build_set::<HotLast>(n);
        let t_last = harness.measure_per(n, |_| member_order::lookup_sum(&set, n, seed));

        Row::new(n, vec![t_first, t_last])
    })?;

    eprintln!("{} {} sizes measured", "member_order:".green().bold(), rows);
    Ok(())
}
