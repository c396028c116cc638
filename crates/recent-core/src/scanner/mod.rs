/// Scanner module — orchestrates a recent-files scan.
///
/// A scan fans out over every root on a rayon pool. Each root is walked by
/// `jwalk`, every entry goes through the shared [`visitor::MetadataVisitor`],
/// which counts it in the [`tally::Tally`] and forwards matching paths over a
/// bounded channel to the single [`collector::ResultCollector`]. Once every
/// root is done the visitor (holding the only sender) is dropped, the
/// collector sorts what it received, and both results are returned together.
pub mod collector;
pub mod tally;
pub mod visitor;
pub mod walk;

use crate::model::ScanTotals;
use collector::ResultCollector;
use rayon::prelude::*;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tally::Tally;
use tracing::info;
use visitor::MetadataVisitor;

/// Default capacity of the match hand-off channel.
///
/// Traversal workers only block on `send` once this many matches are in
/// flight, which the collector (a bare `Vec::push` loop) drains far faster
/// than `lstat` produces them. A stalled collector shows up as back-pressure
/// instead of unbounded heap growth.
pub const MATCH_CHANNEL_CAPACITY: usize = 1_024;

/// Knobs for a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Count and match directories as well as files.
    pub include_dirs: bool,
    /// Collect matching paths. When `false` only the totals are produced.
    pub collect_paths: bool,
    /// Worker threads for visiting, and for each root's directory reads.
    pub threads: usize,
    /// Capacity of the match hand-off channel.
    pub channel_capacity: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_dirs: false,
            collect_paths: true,
            threads: num_cpus::get(),
            channel_capacity: MATCH_CHANNEL_CAPACITY,
        }
    }
}

/// Everything a completed scan produced.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// The cutoff entries were compared against.
    pub cutoff: SystemTime,
    /// Final counters.
    pub totals: ScanTotals,
    /// Matching paths in ascending byte order. Empty when paths were not collected.
    pub paths: Vec<PathBuf>,
    /// Wall-clock time spent walking and collecting.
    pub elapsed: Duration,
}

/// Failures of the scan machinery itself. Filesystem errors never end up here.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to spawn collector thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Scan `roots` for entries modified strictly after `cutoff`.
///
/// An empty `roots` slice is a valid, empty scan.
pub fn scan<P>(roots: &[P], cutoff: SystemTime, options: &ScanOptions) -> Result<ScanReport, ScanError>
where
    P: AsRef<Path> + Sync,
{
    let start = Instant::now();
    let threads = options.threads.max(1);
    info!(
        "Starting scan of {} root(s) with {threads} worker(s)",
        roots.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("recent-visit-{i}"))
        .build()?;

    let tally = Tally::new();

    let (matches_tx, collector) = if options.collect_paths {
        let (tx, rx) = crossbeam_channel::bounded(options.channel_capacity.max(1));
        let collector = ResultCollector::spawn(rx).map_err(ScanError::Spawn)?;
        (Some(tx), Some(collector))
    } else {
        (None, None)
    };

    let visitor = MetadataVisitor::new(cutoff, options.include_dirs, &tally, matches_tx);
    pool.install(|| {
        roots
            .par_iter()
            .for_each(|root| walk::walk_root(root.as_ref(), threads, &visitor));
    });
    // Drops the last sender, closing the channel.
    drop(visitor);

    let paths = collector.map(ResultCollector::finish).unwrap_or_default();
    let totals = tally.into_totals();
    let elapsed = start.elapsed();

    info!(
        "Scan complete: {} of {} entries recent ({} of {} bytes) in {elapsed:?}",
        totals.match_files, totals.total_files, totals.match_bytes, totals.total_bytes
    );

    Ok(ScanReport {
        cutoff,
        totals,
        paths,
        elapsed,
    })
}
