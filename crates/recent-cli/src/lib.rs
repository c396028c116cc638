/// recent CLI — argument parsing, the run loop, and output formatting.
///
/// `run` is the whole program minus process setup: it resolves the cutoff,
/// scans, and writes the report to the given writers, so it can be driven
/// from tests with in-memory buffers.
pub mod args;
pub mod report;

pub use args::{Args, LogLevel};

use recent_core::{resolve_cutoff, scan, CutoffError, ScanError};
use std::io::{self, Write};
use std::time::{Instant, SystemTime};
use tracing::debug;

/// Exit status for failures that are neither cutoff parse errors nor usage errors.
pub const EXIT_FAILURE: u8 = 3;

/// Everything that can end a run early.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Cutoff(#[from] CutoffError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunError {
    /// Process exit status: 1 for a bad time, 2 for a bad duration, 3 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Cutoff(err) => err.exit_code(),
            _ => EXIT_FAILURE,
        }
    }

    /// `true` when stdout was closed early (e.g. piped into `head`),
    /// whether plain paths or the JSON document were being written.
    pub fn is_broken_pipe(&self) -> bool {
        match self {
            Self::Output(err) => err.kind() == io::ErrorKind::BrokenPipe,
            Self::Json(err) => err.io_error_kind() == Some(io::ErrorKind::BrokenPipe),
            _ => false,
        }
    }
}

/// Run one scan as described by `args`.
///
/// Paths (or the JSON document) go to `out`; the verbose summary goes to `err`.
pub fn run<W: Write, E: Write>(args: &Args, out: &mut W, err: &mut E) -> Result<(), RunError> {
    // Captured together so "now" and the elapsed clock agree.
    let start = Instant::now();
    let now = SystemTime::now();

    let cutoff = resolve_cutoff(now, &args.cutoff_request())?;
    debug!("cutoff resolved to {:?}", cutoff);

    let report = scan(&args.roots, cutoff, &args.scan_options())?;

    if args.json {
        report::write_json(out, &report)?;
    } else if !args.quiet {
        report::write_paths(out, &report.paths)?;
    }
    out.flush()?;

    if args.verbose {
        report::write_summary(err, &report.totals, start.elapsed())?;
        err.flush()?;
    }
    Ok(())
}
