/// Root traversal using `jwalk`.
///
/// `jwalk` reads directories in parallel on its own rayon pool and yields
/// entries through an iterator. That iterator is bridged onto the caller's
/// rayon pool with `par_bridge`: each worker pulls the next entry, stats it,
/// and visits it, so visitor invocations run concurrently with each other
/// and with the walk. Nothing is buffered beyond what jwalk itself holds.
///
/// Symlinks are never followed; metadata is read with `symlink_metadata`.
use crate::model::{Entry, VisitError};
use crate::scanner::visitor::MetadataVisitor;
use rayon::iter::{ParallelBridge, ParallelIterator};
use std::path::{Path, PathBuf};
use tracing::debug;

pub type WalkResult = Result<jwalk::DirEntry<((), ())>, jwalk::Error>;

/// Walk `root` and visit every entry under it, including `root` itself.
///
/// Never fails: unreadable roots, directories, and entries reach the visitor
/// as errors.
pub fn walk_root(root: &Path, threads: usize, visitor: &MetadataVisitor<'_>) {
    debug!("walking {}", root.display());

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(threads));

    visit_entries(walker.into_iter(), |result| {
        visitor.visit(stat_entry(result).map(|entry| Entry {
            path: trim_cur_dir(root, entry.path),
            ..entry
        }))
    });

    debug!("finished {}", root.display());
}

/// Stat and visit each walker result on the current rayon pool.
///
/// Workers pull from `entries` one at a time, so with a single worker the
/// walk and the visits simply alternate.
pub fn visit_entries<I, F>(entries: I, visit: F)
where
    I: Iterator<Item = WalkResult> + Send,
    F: Fn(WalkResult) + Sync + Send,
{
    entries.par_bridge().for_each(visit);
}

/// Turn one walker result into an entry, fetching its metadata.
pub fn stat_entry(result: WalkResult) -> Result<Entry, VisitError> {
    let path = result?.path();
    match std::fs::symlink_metadata(&path) {
        Ok(meta) => Entry::from_metadata(path, &meta),
        Err(source) => Err(VisitError::Metadata { path, source }),
    }
}

/// Drop the leading `./` jwalk leaves on descendants of a `.`-relative root,
/// so `recent .` prints `x` rather than `./x`. The root itself is kept as given.
pub fn trim_cur_dir(root: &Path, path: PathBuf) -> PathBuf {
    if path == root || !root.starts_with(".") {
        return path;
    }
    match path.strip_prefix(".") {
        Ok(rest) if !rest.as_os_str().is_empty() => rest.to_path_buf(),
        _ => path,
    }
}
