/// Shared accumulator written by every concurrent visitor invocation.
///
/// One `parking_lot::Mutex` guards all four counters. Each entry takes the
/// lock once for a handful of integer additions, so the total and match pairs
/// for that entry are always applied together.
use crate::model::ScanTotals;
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct Tally {
    totals: Mutex<ScanTotals>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one error-free entry of `size` bytes.
    #[inline]
    pub fn record(&self, size: u64, matched: bool) {
        self.totals.lock().record(size, matched);
    }

    /// Copy of the current counters. Exact once every writer has finished.
    pub fn snapshot(&self) -> ScanTotals {
        *self.totals.lock()
    }

    /// Consume the tally, returning its final counters.
    pub fn into_totals(self) -> ScanTotals {
        self.totals.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_records_are_exact() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 10_000;

        let tally = Tally::new();
        thread::scope(|s| {
            for t in 0..THREADS {
                let tally = &tally;
                s.spawn(move || {
                    for i in 0..PER_THREAD {
                        tally.record(t + 1, i % 2 == 0);
                    }
                });
            }
        });

        let totals = tally.into_totals();
        let bytes: u64 = (1..=THREADS).map(|size| size * PER_THREAD).sum();
        assert_eq!(totals.total_files, THREADS * PER_THREAD);
        assert_eq!(totals.total_bytes, bytes);
        assert_eq!(totals.match_files, THREADS * PER_THREAD / 2);
        assert_eq!(totals.match_bytes, bytes / 2);
    }

    #[test]
    fn snapshot_of_fresh_tally_is_zero() {
        assert_eq!(Tally::new().snapshot(), ScanTotals::default());
    }
}
