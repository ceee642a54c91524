//! CLI for distmat: multiply matrices whose entries are sample-derived distributions.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use distmat_core::{DEFAULT_MAX_DIM, DEFAULT_PREFIX_A, DEFAULT_PREFIX_B};

#[derive(Parser, Debug)]
#[command(name = "matrix-multiplication")]
#[command(about = "Multiply two matrices of distributions loaded from sample files")]
#[command(version = distmat_core::VERSION)]
#[command(
    override_usage = "matrix-multiplication -a <file prefix for A> -m <A rows> -n <A columns> \
                      -b <file prefix for B> -x <B rows> -y <B columns>"
)]
struct Cli {
    /// File prefix for A; entry (i, j) is read from <prefix>-i-j.txt
    #[arg(short = 'a', value_name = "PREFIX", default_value = DEFAULT_PREFIX_A)]
    prefix_a: String,

    /// A rows
    #[arg(short = 'm', value_name = "ROWS", default_value_t = DEFAULT_MAX_DIM)]
    rows_a: usize,

    /// A columns
    #[arg(short = 'n', value_name = "COLS", default_value_t = DEFAULT_MAX_DIM)]
    cols_a: usize,

    /// File prefix for B; entry (i, j) is read from <prefix>-i-j.txt
    #[arg(short = 'b', value_name = "PREFIX", default_value = DEFAULT_PREFIX_B)]
    prefix_b: String,

    /// B rows
    #[arg(short = 'x', value_name = "ROWS", default_value_t = DEFAULT_MAX_DIM)]
    rows_b: usize,

    /// B columns
    #[arg(short = 'y', value_name = "COLS", default_value_t = DEFAULT_MAX_DIM)]
    cols_b: usize,

    /// Propagation backend: empirical (alias mc, monte-carlo) or moments (alias analytic)
    #[arg(
        long,
        default_value = "empirical",
        value_parser = ["empirical", "mc", "monte-carlo", "moments", "analytic"]
    )]
    backend: String,

    /// Largest accepted row/column count
    #[arg(long, default_value_t = DEFAULT_MAX_DIM)]
    max_dim: usize,

    /// Print mean ± std dev and the 90% interval of every result entry
    #[arg(long)]
    summary: bool,

    /// Write operand and result summaries as JSON
    #[arg(long)]
    output: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = commands::multiply::run(commands::multiply::MultiplyCommandConfig {
        prefix_a: &cli.prefix_a,
        rows_a: cli.rows_a,
        cols_a: cli.cols_a,
        prefix_b: &cli.prefix_b,
        rows_b: cli.rows_b,
        cols_b: cli.cols_b,
        backend: &cli.backend,
        max_dim: cli.max_dim,
        summary: cli.summary,
        output_path: cli.output.as_deref(),
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
