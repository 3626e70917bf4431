/// Background snapshot loading.
///
/// Parsing a large snapshot can take seconds, so it runs on a dedicated
/// thread. The UI thread drains [`LoadProgress`] messages from the handle
/// once per frame and takes the finished tree from the `Complete` message.
use crate::error::{Error, Result};
use crate::model::snapshot::read_snapshot;
use crate::model::FileTree;

use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Messages sent from the loader thread to the UI.
#[derive(Debug)]
pub enum LoadProgress {
    /// The file is being read and parsed.
    Started { path: PathBuf },
    /// The tree is built and ready to be shared with the views.
    Complete {
        tree: Arc<FileTree>,
        duration: Duration,
    },
    /// Reading or parsing failed. The message is ready for the status bar.
    Failed { message: String },
    /// Cancelled by the user before the tree was handed over.
    Cancelled,
}

/// Only a handful of messages are ever sent per load.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 16;

/// Handle to a running or finished load.
pub struct LoadHandle {
    pub progress_rx: Receiver<LoadProgress>,
    cancel_flag: Arc<AtomicBool>,
    _thread: Option<thread::JoinHandle<()>>,
}

impl LoadHandle {
    /// Request the load to stop. The parse itself is not interruptible; the
    /// result is simply dropped.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Read, parse and ingest a snapshot on the calling thread.
pub fn load_tree(path: &Path) -> Result<FileTree> {
    let snapshot = read_snapshot(path)?;
    Ok(FileTree::from_snapshot(snapshot))
}

/// Start loading `path` on a background thread.
pub fn start_load(path: PathBuf) -> Result<LoadHandle> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<LoadProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();
    let thread_path = path.clone();

    let thread = thread::Builder::new()
        .name("treelens-loader".into())
        .spawn(move || {
            let path = thread_path;
            info!("Loading snapshot {}", path.display());
            let start = Instant::now();
            let _ = progress_tx.send(LoadProgress::Started { path: path.clone() });

            let result = load_tree(&path);
            if cancel_clone.load(Ordering::Relaxed) {
                info!("Load of {} cancelled", path.display());
                let _ = progress_tx.send(LoadProgress::Cancelled);
                return;
            }

            let message = match result {
                Ok(tree) => {
                    let duration = start.elapsed();
                    info!(
                        "Loaded {} nodes from {} in {:.2?}",
                        tree.len(),
                        path.display(),
                        duration
                    );
                    LoadProgress::Complete {
                        tree: Arc::new(tree),
                        duration,
                    }
                }
                Err(e) => {
                    warn!("Snapshot load failed: {e}");
                    LoadProgress::Failed {
                        message: e.to_string(),
                    }
                }
            };
            // The receiver may already be gone if the UI started another load.
            let _ = progress_tx.send(message);
        })
        .map_err(|e| Error::io(&path, e))?;

    Ok(LoadHandle {
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_tree_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_tree(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_tree_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_tree(&path).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_cancel_flag() {
        let dir = TempDir::new().unwrap();
        let handle = start_load(dir.path().join("missing.json")).unwrap();
        assert!(!handle.is_cancelled());
        handle.cancel();
        assert!(handle.is_cancelled());
    }
}
