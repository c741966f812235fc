//! Wall-clock measurement of short closures.
//!
//! A measurement is a series of trials. Each trial reruns the closure until a
//! minimum time has passed and records the mean time per run; the trials are
//! sorted, the extremes trimmed, and the remainder averaged.

use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::TimingConfig;
use crate::error::BenchError;

/// Start/pause/resume timer for one trial.
///
/// The measured closure receives the running clock and may bracket setup work
/// with [`pause`](Self::pause) and [`resume`](Self::resume); the bracketed time
/// is removed from the trial. A pause with no matching resume has no effect.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    started: Instant,
    paused_at: Option<Instant>,
}

impl Clock {
    pub fn start() -> Self {
        Clock {
            started: Instant::now(),
            paused_at: None,
        }
    }

    pub fn pause(&mut self) {
        self.paused_at = Some(Instant::now());
    }

    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.started += paused_at.elapsed();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

pub struct Harness {
    config: TimingConfig,
}

impl Harness {
    pub fn new(config: TimingConfig) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Harness { config })
    }

    /// Trimmed mean time of one call to `f`, in microseconds.
    pub fn measure<R, F>(&self, mut f: F) -> f64
    where
        F: FnMut(&mut Clock) -> R,
    {
        let min_time = self.config.min_trial_time();
        let mut trials = Vec::with_capacity(self.config.trials);

        for trial in 0..self.config.trials {
            let mut runs = 0u64;
            let mut clock = Clock::start();
            let elapsed = loop {
                black_box(f(&mut clock));
                runs += 1;
                let elapsed = clock.elapsed();
                if elapsed >= min_time {
                    break elapsed;
                }
            };
            let per_run = elapsed.as_secs_f64() / runs as f64;
            debug!(trial, runs, per_run, "trial finished");
            trials.push(per_run);
        }

        trimmed_mean(&mut trials, self.config.trim) * 1e6
    }

    /// [`measure`](Self::measure) divided by `n`: microseconds per element.
    pub fn measure_per<R, F>(&self, n: usize, f: F) -> f64
    where
        F: FnMut(&mut Clock) -> R,
    {
        self.measure(f) / n.max(1) as f64
    }
}

fn trimmed_mean(samples: &mut [f64], trim: usize) -> f64 {
    samples.sort_by(f64::total_cmp);
    let kept = &samples[trim..samples.len() - trim];
    kept.iter().sum::<f64>() / kept.len() as f64
}
