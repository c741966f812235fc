//! Command-line options shared by every benchmark binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::BenchConfig;
use crate::error::BenchError;

#[derive(Debug, Default, Parser)]
#[command(version, about = "Data layout micro-benchmark")]
pub struct BenchArgs {
    /// TOML file with sweep and timing settings
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Smallest input size
    #[arg(long)]
    pub n0: Option<usize>,

    /// Largest input size
    #[arg(long)]
    pub n1: Option<usize>,

    /// Trials per measurement
    #[arg(long)]
    pub trials: Option<usize>,

    /// Seed for generated inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every trial to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl BenchArgs {
    /// Starts from `defaults`, layers the config file over it if one was
    /// given, then applies the command-line overrides and validates the result.
    pub fn resolve(&self, defaults: BenchConfig) -> Result<BenchConfig, BenchError> {
        let mut config = match &self.config {
            Some(path) => BenchConfig::load_over(path, &defaults)?,
            None => defaults,
        };
        if let Some(n0) = self.n0 {
            config.sweep.n0 = n0;
        }
        if let Some(n1) = self.n1 {
            config.sweep.n1 = n1;
        }
        if let Some(trials) = self.trials {
            config.timing.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Sends tracing output to stderr so stdout carries only the report.
pub fn init_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .try_init();
}
