// Array-of-Structs vs Struct-of-Arrays when every field is read.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::particles::{self, CompactParticlesSoA};
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;

    let rows = run_sweep(
        &config,
        "compact aos vs soa",
        &["aos", "soa"],
        io::stdout().lock(),
        |harness, n| {
            let aos = particles::compact_particles_aos(n);
            let t_aos = harness.measure_per(n, |_| particles::sum_compact_aos(&aos));
            drop(aos);

            let soa = CompactParticlesSoA::new(n);
            let t_soa = harness.measure_per(n, |_| particles::sum_compact_soa(&soa));

            Row::new(n, vec![t_aos, t_soa])
        },
    )?;

    eprintln!("{} {} sizes measured", "compact aos vs soa:".green().bold(), rows);
    Ok(())
}
