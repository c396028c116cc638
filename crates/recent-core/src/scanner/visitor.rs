/// Per-entry callback: classify against the cutoff, count, forward matches.
///
/// The visitor is shared by reference across every traversal worker. It
/// holds the only sender side of the match channel, so dropping it is what
/// closes the channel and lets the collector finish.
use crate::model::{Entry, VisitError};
use crate::scanner::tally::Tally;
use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;

pub struct MetadataVisitor<'a> {
    cutoff: SystemTime,
    include_dirs: bool,
    tally: &'a Tally,
    /// `None` in quiet mode: matches are counted but never collected.
    matches: Option<Sender<PathBuf>>,
}

impl<'a> MetadataVisitor<'a> {
    pub fn new(
        cutoff: SystemTime,
        include_dirs: bool,
        tally: &'a Tally,
        matches: Option<Sender<PathBuf>>,
    ) -> Self {
        Self {
            cutoff,
            include_dirs,
            tally,
            matches,
        }
    }

    /// Visit one entry. Safe to call from any number of threads at once.
    ///
    /// Errors are skipped without touching any counter. The tally lock is
    /// released before the (possibly blocking) channel send.
    pub fn visit(&self, entry: Result<Entry, VisitError>) {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                debug!("skipping entry: {err}");
                return;
            }
        };

        if entry.is_dir && !self.include_dirs {
            return;
        }

        let matched = entry.is_modified_after(self.cutoff);
        self.tally.record(entry.size, matched);

        if matched {
            if let Some(tx) = &self.matches {
                // The collector outlives every visitor, so a send can only
                // fail if it panicked; that panic is resumed on join.
                let _ = tx.send(entry.path);
            }
        }
    }
}
