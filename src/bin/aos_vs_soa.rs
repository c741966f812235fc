// Array-of-Structs vs Struct-of-Arrays: summing positions of particles that
// also carry velocities.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::particles::{self, ParticlesSoA};
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;

    let rows = run_sweep(&config, "aos vs soa", &["aos", "soa"], io::stdout().lock(), |harness, n| {
        let aos = particles::particles_aos(n);
        let t_aos = harness.measure_per(n, |_| particles::sum_positions_aos(&aos));
        drop(aos);

        let soa = ParticlesSoA::new(n);
        let t_soa = harness.measure_per(n, |_| particles::sum_positions_soa(&soa));

        Row::new(n, vec![t_aos, t_soa])
    })?;

    eprintln!("{} {} sizes measured", "aos vs soa:".green().bold(), rows);
    Ok(())
}
