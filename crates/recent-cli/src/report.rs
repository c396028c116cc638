/// Reporting — sorted paths, the verbose summary, and the JSON document.
use chrono::{DateTime, SecondsFormat, Utc};
use recent_core::model::{format_size, percent};
use recent_core::{ScanReport, ScanTotals};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One path per line, in the order given.
///
/// On unix the raw path bytes are written, so names that are not valid
/// UTF-8 come out exactly as stored and in the order they were sorted.
pub fn write_paths<W: Write>(out: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    for path in paths {
        write_path(out, path)?;
    }
    Ok(())
}

#[cfg(unix)]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    out.write_all(path.as_os_str().as_encoded_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_path<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", path.display())
}

/// Two-line statistics summary: everything scanned, then what was recent.
///
/// Percentages of an empty scan are printed as 0.00 rather than NaN.
pub fn write_summary<W: Write>(out: &mut W, totals: &ScanTotals, elapsed: Duration) -> io::Result<()> {
    writeln!(
        out,
        "     total: {:8} files ({:7.2}%), {:13} bytes ({:7.2}%) [{}]",
        totals.total_files,
        percent(totals.total_files, totals.total_files),
        totals.total_bytes,
        percent(totals.total_bytes, totals.total_bytes),
        format_size(totals.total_bytes),
    )?;
    writeln!(
        out,
        "    recent: {:8} files ({:7.2}%), {:13} bytes ({:7.2}%) [{}] in {:.4} seconds",
        totals.match_files,
        totals.match_file_percent(),
        totals.match_bytes,
        totals.match_byte_percent(),
        format_size(totals.match_bytes),
        elapsed.as_secs_f64(),
    )
}

/// Machine-readable form of a [`ScanReport`].
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    /// RFC 3339, UTC.
    cutoff: String,
    elapsed_secs: f64,
    totals: &'a ScanTotals,
    /// Non-UTF-8 paths are converted lossily.
    paths: Vec<String>,
}

/// Write `report` as a single pretty-printed JSON document.
pub fn write_json<W: Write>(out: &mut W, report: &ScanReport) -> Result<(), serde_json::Error> {
    let doc = JsonReport {
        cutoff: DateTime::<Utc>::from(report.cutoff).to_rfc3339_opts(SecondsFormat::AutoSi, true),
        elapsed_secs: report.elapsed.as_secs_f64(),
        totals: &report.totals,
        paths: report
            .paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out).map_err(serde_json::Error::io)
}
