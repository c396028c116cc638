/// A single filesystem entry as seen by the scanner.
///
/// Only metadata is captured: the scanner never opens or reads a file.
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One visited file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Full path as produced by the walker (root joined with relative components).
    pub path: PathBuf,
    /// Last modification time.
    pub modified: SystemTime,
    /// Logical size in bytes. For directories this is whatever the OS reports.
    pub size: u64,
    /// `true` if this entry is a directory (symlinks are never followed).
    pub is_dir: bool,
}

impl Entry {
    /// Create a non-directory entry.
    pub fn file(path: impl Into<PathBuf>, modified: SystemTime, size: u64) -> Self {
        Self {
            path: path.into(),
            modified,
            size,
            is_dir: false,
        }
    }

    /// Create a directory entry.
    pub fn dir(path: impl Into<PathBuf>, modified: SystemTime, size: u64) -> Self {
        Self {
            path: path.into(),
            modified,
            size,
            is_dir: true,
        }
    }

    /// Build an entry from already-fetched metadata.
    ///
    /// Fails only when the platform cannot report a modification time.
    pub fn from_metadata(path: PathBuf, meta: &Metadata) -> Result<Self, VisitError> {
        let modified = match meta.modified() {
            Ok(t) => t,
            Err(source) => return Err(VisitError::Metadata { path, source }),
        };
        Ok(Self {
            path,
            modified,
            size: meta.len(),
            is_dir: meta.is_dir(),
        })
    }

    /// Strictly-after comparison: an entry modified exactly at `cutoff` is not recent.
    #[inline]
    pub fn is_modified_after(&self, cutoff: SystemTime) -> bool {
        self.modified > cutoff
    }
}

/// Why an entry could not be visited.
///
/// These are always recovered locally by the visitor: the entry is skipped
/// and excluded from every counter.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// The walker could not read a directory or produce the entry.
    #[error("walk error: {0}")]
    Walk(#[from] jwalk::Error),

    /// The entry exists but its metadata could not be read.
    #[error("cannot stat {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl VisitError {
    /// The path the error relates to, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Walk(err) => err.path(),
            Self::Metadata { path, .. } => Some(path),
        }
    }
}
