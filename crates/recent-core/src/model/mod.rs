/// Data model for a recent-files scan.
///
/// Entries are produced by the walker, totals by the shared tally, and
/// sizes are only turned into text at the display boundary.
pub mod entry;
pub mod size;
pub mod totals;

pub use entry::{Entry, VisitError};
pub use size::format_size;
pub use totals::{percent, ScanTotals};
