/// recent core — cutoff resolution, parallel scanning, and the data model.
///
/// This crate contains all scanning logic with no terminal dependencies.
/// The `recent` binary and its CLI crate are thin layers on top of it.
///
/// # Modules
///
/// - [`cutoff`] — Turns an absolute time or a relative duration into one cutoff instant.
/// - [`model`] — Visited entries, scan totals, and size formatting.
/// - [`scanner`] — Parallel traversal, the shared tally, and the sorted result collector.
pub mod cutoff;
pub mod model;
pub mod scanner;

pub use cutoff::{resolve_cutoff, CutoffError, CutoffRequest, DEFAULT_TIME_FORMAT};
pub use model::{Entry, ScanTotals};
pub use scanner::{scan, ScanError, ScanOptions, ScanReport};
