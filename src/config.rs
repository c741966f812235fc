//! Benchmark configuration, loaded from TOML.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! seed = 42
//!
//! [sweep]
//! n1 = 1000000
//!
//! [timing]
//! trials = 6
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Input sizes to measure: `n = n0; n <= n1; n += dn; dn = floor(dn * growth)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub n0: usize,
    pub n1: usize,
    pub dn: usize,
    pub growth: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            n0: 10_000,
            n1: 40_000_000,
            dn: 2_000,
            growth: 1.1,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.n0 > self.n1 {
            return Err(BenchError::invalid_config(
                "sweep.n0",
                format!("{} is larger than n1 ({})", self.n0, self.n1),
            ));
        }
        if self.dn == 0 {
            return Err(BenchError::invalid_config("sweep.dn", "must be positive"));
        }
        if !(self.growth >= 1.0 && self.growth.is_finite()) {
            return Err(BenchError::invalid_config(
                "sweep.growth",
                format!("{} must be a finite factor of at least 1.0", self.growth),
            ));
        }
        Ok(())
    }
}

/// How each measurement is repeated and summarised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Number of trials per measurement.
    pub trials: usize,
    /// Fastest and slowest trials dropped before averaging, per side.
    pub trim: usize,
    /// Each trial repeats the measured closure for at least this long.
    pub min_trial_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            trials: 10,
            trim: 2,
            min_trial_ms: 200,
        }
    }
}

impl TimingConfig {
    pub fn min_trial_time(&self) -> Duration {
        Duration::from_millis(self.min_trial_ms)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.trials <= 2 * self.trim {
            return Err(BenchError::invalid_config(
                "timing.trials",
                format!(
                    "{} trials leave nothing to average after trimming {} from each end",
                    self.trials, self.trim
                ),
            ));
        }
        if self.min_trial_ms == 0 {
            return Err(BenchError::invalid_config(
                "timing.min_trial_ms",
                "must be positive",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub sweep: SweepConfig,
    pub timing: TimingConfig,
    /// Seed for every random input the workloads generate.
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            sweep: SweepConfig::default(),
            timing: TimingConfig::default(),
            seed: 5489,
        }
    }
}

impl BenchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, BenchError> {
        Ok(toml::from_str(content)?)
    }

    /// Parses `content` with every missing key taken from `base` instead of
    /// the global defaults.
    pub fn from_toml_str_over(content: &str, base: &BenchConfig) -> Result<Self, BenchError> {
        let overrides: toml::Table = toml::from_str(content)?;
        let mut merged = toml::Value::try_from(base)?;
        if let toml::Value::Table(table) = &mut merged {
            merge_tables(table, overrides);
        }
        let config: BenchConfig = merged.try_into()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, BenchError> {
        Self::from_toml_str(&read_config(path)?)
    }

    /// Like [`load`](Self::load), layering the file over `base`.
    pub fn load_over(path: &Path, base: &BenchConfig) -> Result<Self, BenchError> {
        Self::from_toml_str_over(&read_config(path)?, base)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        self.sweep.validate()?;
        self.timing.validate()
    }
}

fn read_config(path: &Path) -> Result<String, BenchError> {
    fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

fn merge_tables(into: &mut toml::Table, from: toml::Table) {
    for (key, value) in from {
        match value {
            toml::Value::Table(nested) => match into.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, nested),
                _ => {
                    into.insert(key, toml::Value::Table(nested));
                }
            },
            value => {
                into.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BenchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BenchConfig::from_toml_str(
            r#"
            seed = 7

            [sweep]
            n1 = 50000
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.sweep.n1, 50_000);
        assert_eq!(config.sweep.n0, 10_000);
        assert_eq!(config.timing, TimingConfig::default());
    }

    #[test]
    fn test_file_layers_over_caller_base() {
        let mut base = BenchConfig::default();
        base.sweep.n0 = 1_000_000;
        base.timing.trim = 1;

        let config = BenchConfig::from_toml_str_over(
            r#"
            [sweep]
            n1 = 2000000

            [timing]
            trials = 4
            "#,
            &base,
        )
        .unwrap();

        assert_eq!(config.sweep.n0, 1_000_000);
        assert_eq!(config.sweep.n1, 2_000_000);
        assert_eq!(config.sweep.growth, 1.1);
        assert_eq!(config.timing.trials, 4);
        assert_eq!(config.timing.trim, 1);
        assert_eq!(config.seed, 5489);
    }

    #[test]
    fn test_layered_parse_rejects_wrong_types() {
        let err = BenchConfig::from_toml_str_over("[sweep]\nn0 = \"big\"", &BenchConfig::default())
            .unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = BenchConfig::from_toml_str("[sweep\nn0 = 1").unwrap_err();
        assert!(matches!(err, BenchError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timing]\ntrials = 5\ntrim = 1").unwrap();

        let config = BenchConfig::load(file.path()).unwrap();
        assert_eq!(config.timing.trials, 5);
        assert_eq!(config.timing.trim, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BenchConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, BenchError::ConfigRead { .. }));
    }

    #[test]
    fn test_rejects_over_trimmed_timing() {
        let timing = TimingConfig {
            trials: 4,
            trim: 2,
            min_trial_ms: 10,
        };
        match timing.validate() {
            Err(BenchError::InvalidConfig { field, .. }) => assert_eq!(field, "timing.trials"),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_sweep() {
        let inverted = SweepConfig {
            n0: 10,
            n1: 5,
            ..SweepConfig::default()
        };
        assert!(inverted.validate().is_err());

        let shrinking = SweepConfig {
            growth: 0.5,
            ..SweepConfig::default()
        };
        assert!(shrinking.validate().is_err());

        let stalled = SweepConfig {
            dn: 0,
            ..SweepConfig::default()
        };
        assert!(stalled.validate().is_err());
    }
}
