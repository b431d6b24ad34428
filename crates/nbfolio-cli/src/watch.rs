//! File watcher for page inputs.
//!
//! Watches the page config and its assets and reports changes so the page
//! can be regenerated.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify_debouncer_mini::{DebounceEventResult, new_debouncer, notify::RecursiveMode};

/// File change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// File was modified or created.
    Modified(PathBuf),
    /// File was removed.
    Removed(PathBuf),
}

/// File watcher handle.
pub struct FileWatcher {
    /// Debouncer handle (kept alive to maintain watcher).
    _debouncer: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
    /// Receiver for file events.
    rx: mpsc::Receiver<FileEvent>,
}

impl FileWatcher {
    /// Watch the given files.
    ///
    /// Files need not exist yet; their parent directories are watched and
    /// events for other files in them are dropped. Directories that do not
    /// exist are skipped with a warning.
    pub fn new(paths: &[PathBuf]) -> anyhow::Result<Self> {
        let targets: BTreeSet<PathBuf> = paths
            .iter()
            .map(|p| resolve(p))
            .collect::<std::io::Result<_>>()?;
        let dirs: BTreeSet<PathBuf> = targets
            .iter()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .collect();

        let (tx, rx) = mpsc::channel();

        let mut debouncer = new_debouncer(
            Duration::from_millis(200),
            move |result: DebounceEventResult| {
                let events = match result {
                    Ok(events) => events,
                    Err(e) => {
                        tracing::warn!("Watch error: {}", e);
                        return;
                    }
                };

                for event in events {
                    if !targets.contains(&event.path) {
                        continue;
                    }

                    let file_event = if event.path.exists() {
                        FileEvent::Modified(event.path.clone())
                    } else {
                        FileEvent::Removed(event.path.clone())
                    };

                    let _ = tx.send(file_event);
                }
            },
        )
        .map_err(|e| anyhow::anyhow!("Failed to create file watcher: {}", e))?;

        for dir in &dirs {
            if !dir.is_dir() {
                tracing::warn!("Not watching {}: directory does not exist", dir.display());
                continue;
            }
            debouncer
                .watcher()
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|e| anyhow::anyhow!("Failed to watch {}: {}", dir.display(), e))?;
            tracing::debug!("Watching {}", dir.display());
        }

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Block until the next file event. `None` once the watcher has stopped.
    pub fn recv(&self) -> Option<FileEvent> {
        self.rx.recv().ok()
    }
}

/// Canonical path for files that exist, absolute path otherwise.
fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    path.canonicalize().or_else(|_| std::path::absolute(path))
}
