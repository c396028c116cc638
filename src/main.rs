//! recent — find recently-modified files.
//!
//! Thin binary entry point. All logic lives in the `recent-core`
//! and `recent-cli` crates.

use clap::Parser;
use recent_cli::{Args, EXIT_FAILURE};
use std::io::{self, BufWriter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_level.into()) {
        eprintln!("recent: {e:#}");
        return ExitCode::from(EXIT_FAILURE);
    }
    tracing::debug!("recent starting");

    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr();

    match recent_cli::run(&args, &mut out, &mut err) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_broken_pipe() => ExitCode::SUCCESS,
        Err(e) => {
            drop(out);
            eprintln!("recent: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Structured diagnostics go to stderr so stdout stays a clean list of paths.
fn init_logging(level: tracing::Level) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
