/// Aggregate counters for a scan: everything seen vs. everything recent.
use serde::Serialize;

/// Snapshot of the four scan counters.
///
/// After a scan completes `match_files <= total_files` and
/// `match_bytes <= total_bytes` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanTotals {
    /// Entries counted (errors excluded).
    pub total_files: u64,
    /// Sum of sizes of counted entries.
    pub total_bytes: u64,
    /// Counted entries modified strictly after the cutoff.
    pub match_files: u64,
    /// Sum of sizes of matching entries.
    pub match_bytes: u64,
}

impl ScanTotals {
    /// Add one counted entry.
    #[inline]
    pub fn record(&mut self, size: u64, matched: bool) {
        self.total_files += 1;
        self.total_bytes += size;
        if matched {
            self.match_files += 1;
            self.match_bytes += size;
        }
    }

    /// Percentage of counted entries that matched.
    pub fn match_file_percent(&self) -> f64 {
        percent(self.match_files, self.total_files)
    }

    /// Percentage of counted bytes that matched.
    pub fn match_byte_percent(&self) -> f64 {
        percent(self.match_bytes, self.total_bytes)
    }
}

/// `part` as a percentage of `whole`. An empty whole is 0%, not NaN.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}
