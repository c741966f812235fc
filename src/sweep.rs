//! Input-size schedule and semicolon-separated result tables.

use std::io::Write;
use std::time::Instant;

use tracing::info;

use crate::config::{BenchConfig, SweepConfig};
use crate::error::BenchError;
use crate::harness::Harness;

/// Sizes `n0, n0 + dn, ...` up to `n1`, with the step growing by `growth`
/// after every size.
#[derive(Debug, Clone)]
pub struct Sweep {
    next: Option<usize>,
    end: usize,
    step: usize,
    growth: f64,
}

impl Sweep {
    pub fn new(config: &SweepConfig) -> Self {
        Sweep {
            next: Some(config.n0),
            end: config.n1,
            step: config.dn,
            growth: config.growth,
        }
    }
}

impl Iterator for Sweep {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let n = self.next.filter(|&n| n <= self.end)?;
        self.next = n.checked_add(self.step);
        self.step = (self.step as f64 * self.growth) as usize;
        Some(n)
    }
}

/// One line of a report: the effective size and one timing per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub n: usize,
    pub values: Vec<f64>,
}

impl Row {
    pub fn new(n: usize, values: Vec<f64>) -> Self {
        Row { n, values }
    }
}

pub struct Report<W: Write> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Report { out }
    }

    /// Writes `title:` followed by the `n;col;col` header line.
    pub fn header(&mut self, title: &str, columns: &[&str]) -> Result<(), BenchError> {
        writeln!(self.out, "{title}:")?;
        write!(self.out, "n")?;
        for column in columns {
            write!(self.out, ";{column}")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn row(&mut self, row: &Row) -> Result<(), BenchError> {
        write!(self.out, "{}", row.n)?;
        for value in &row.values {
            write!(self.out, ";{value}")?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Measures every size of the configured sweep, writing each row as soon as
/// it is ready. Returns the number of rows written.
pub fn run_sweep<W, F>(
    config: &BenchConfig,
    title: &str,
    columns: &[&str],
    out: W,
    mut measure_row: F,
) -> Result<usize, BenchError>
where
    W: Write,
    F: FnMut(&Harness, usize) -> Row,
{
    config.validate()?;
    let harness = Harness::new(config.timing.clone())?;
    let mut report = Report::new(out);
    report.header(title, columns)?;

    let started = Instant::now();
    let mut rows = 0;
    for n in Sweep::new(&config.sweep) {
        let row = measure_row(&harness, n);
        debug_assert_eq!(row.values.len(), columns.len());
        report.row(&row)?;
        rows += 1;
        info!(n = row.n, elapsed = ?started.elapsed(), "{title}: row complete");
    }
    Ok(rows)
}
