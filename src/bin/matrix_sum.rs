// Matrix sum: row-by-row vs column-by-column over a row-major grid.

use std::io;

use clap::Parser;
use colored::Colorize;
use layout_bench::cli::{self, BenchArgs};
use layout_bench::config::BenchConfig;
use layout_bench::sweep::{run_sweep, Row};
use layout_bench::workloads::matrix::Matrix;
use layout_bench::BenchError;

fn main() -> Result<(), BenchError> {
    let args = BenchArgs::parse();
    cli::init_tracing(args.verbose);
    let config = args.resolve(BenchConfig::default())?;

    let rows = run_sweep(&config, "matrix sum", &["row_col", "col_row"], io::stdout().lock(), |harness, n| {
        let matrix = Matrix::for_size(n);
        let cells = matrix.len();
        let t_row = harness.measure_per(cells, |_| matrix.sum_row_major());
        let t_col = harness.measure_per(cells, |_| matrix.sum_col_major());

        Row::new(cells, vec![t_row, t_col])
    })?;

    eprintln!("{} {} sizes measured", "matrix sum:".green().bold(), rows);
    Ok(())
}
