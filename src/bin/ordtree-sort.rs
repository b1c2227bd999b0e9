//! ordtree-sort - sort lines through an order-t B-tree.
//!
//! Reads byte records from FILE (or stdin), inserts each into a B-tree, then
//! drains the tree writing them back in byte order. Any failure is fatal and
//! exits with status 70.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ordtree::common::config::{DEFAULT_DEGREE, EXIT_SOFTWARE};
use ordtree::driver::{sort_file, sort_lines, SortOptions, SortReport};
use ordtree::Result;

/// Sort lines through an order-t B-tree
#[derive(Parser, Debug)]
#[command(name = "ordtree-sort")]
#[command(version)]
#[command(about = "Sort lines through an order-t B-tree")]
struct Args {
    /// B-tree degree t (nodes hold t-1 to 2t-1 keys)
    #[arg(short, long, default_value_t = DEFAULT_DEGREE)]
    degree: usize,

    /// Insert and free without writing the sorted records
    #[arg(short, long)]
    quiet: bool,

    /// Input file (stdin when absent)
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(report) => {
            debug!(?report, "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("ordtree-sort: {err}");
            ExitCode::from(EXIT_SOFTWARE)
        }
    }
}

fn run(args: &Args) -> Result<SortReport> {
    let options = SortOptions {
        degree: args.degree,
        emit: !args.quiet,
    };

    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    match &args.input {
        Some(path) => sort_file(path, output, &options),
        None => sort_lines(io::stdin().lock(), output, &options),
    }
}
