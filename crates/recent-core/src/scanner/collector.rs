/// Result collector — the single consumer of matching paths.
///
/// Runs on its own thread, appends every received path to a private buffer,
/// and sorts once the channel is closed and drained. The caller gets the
/// sorted buffer back through `finish`, which joins the thread, so a partial
/// sort is never observable.
use crossbeam_channel::Receiver;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::thread;
use tracing::debug;

pub struct ResultCollector {
    thread: thread::JoinHandle<Vec<PathBuf>>,
}

impl ResultCollector {
    /// Start draining `rx` on a background thread.
    pub fn spawn(rx: Receiver<PathBuf>) -> io::Result<Self> {
        let thread = thread::Builder::new()
            .name("recent-collector".into())
            .spawn(move || collect_sorted(rx))?;
        Ok(Self { thread })
    }

    /// Wait for every sender to be dropped and return the sorted result.
    ///
    /// A panic on the collector thread is resumed on the caller.
    pub fn finish(self) -> Vec<PathBuf> {
        match self.thread.join() {
            Ok(paths) => paths,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Drain `rx` until it disconnects, then sort.
pub fn collect_sorted(rx: Receiver<PathBuf>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = rx.iter().collect();
    debug!("collector received {} paths, sorting", paths.len());
    sort_paths(&mut paths);
    paths
}

/// Sort by the raw bytes of each path, ascending.
///
/// `PathBuf`'s own `Ord` compares component by component, which puts
/// `a/b` before `a-b`; byte order puts `a-b` first.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_unstable_by(|a, b| {
        a.as_os_str()
            .as_encoded_bytes()
            .cmp(b.as_os_str().as_encoded_bytes())
    });
}
