//! Directory watcher implementation.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info, warn};

use crate::config::WatchConfig;
use crate::error::{Result, WatcherError};
use crate::event::{ChangeKind, ChangeMask, FileEntry, FileEvent, is_hidden_under};

type Callback = dyn Fn(FileEvent) + Send + Sync + 'static;

/// Shared between the watcher handle and the notify thread.
struct WatchState {
    root: PathBuf,
    mask: ChangeMask,
    active: AtomicBool,
    callback: Box<Callback>,
}

impl WatchState {
    fn dispatch(&self, res: std::result::Result<notify::Event, notify::Error>) {
        if !self.active.load(Ordering::Acquire) {
            return;
        }

        let event = match res {
            Ok(event) => event,
            Err(e) => {
                warn!("Watch error on {}: {e}", self.root.display());
                return;
            }
        };

        if !self.root.is_dir() {
            warn!(
                "Watched directory disappeared, stopping: {}",
                self.root.display()
            );
            self.active.store(false, Ordering::Release);
            return;
        }

        let Some(kind) = ChangeKind::from_notify(&event.kind) else {
            return;
        };
        if !self.mask.contains(kind.mask()) {
            return;
        }

        for path in event.paths {
            let entry = FileEntry::resolve(path);
            if entry.is_hidden || is_hidden_under(&self.root, &entry.path) {
                debug!("Skipping hidden entry: {}", entry.path.display());
                continue;
            }

            let file_event = FileEvent::new(kind, entry);
            if catch_unwind(AssertUnwindSafe(|| (self.callback)(file_event))).is_err() {
                error!("Watch callback panicked for {}", self.root.display());
            }
        }
    }
}

/// Watches one directory and hands each change to a callback.
///
/// Callbacks run on the notify thread. The watch stops when dropped,
/// when [`DirectoryWatcher::stop`] is called, or when the directory itself
/// vanishes.
pub struct DirectoryWatcher {
    state: Arc<WatchState>,
    watcher: Option<RecommendedWatcher>,
}

impl DirectoryWatcher {
    /// Start watching `path`.
    ///
    /// Fails with [`WatcherError::Config`] when `path` is not an existing
    /// directory, and with [`WatcherError::Notify`] when the platform refuses
    /// the watch.
    pub fn watch<F>(path: impl AsRef<Path>, config: WatchConfig, callback: F) -> Result<Self>
    where
        F: Fn(FileEvent) + Send + Sync + 'static,
    {
        let root = path.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(WatcherError::Config(format!(
                "not a directory: {}",
                root.display()
            )));
        }

        let state = Arc::new(WatchState {
            root: root.clone(),
            mask: config.mask,
            active: AtomicBool::new(true),
            callback: Box::new(callback),
        });

        let handler_state = Arc::clone(&state);
        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| {
                handler_state.dispatch(res);
            },
        )?;

        let mode = if config.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(&root, mode)?;

        info!("Watching directory: {}", root.display());

        Ok(Self {
            state,
            watcher: Some(watcher),
        })
    }

    /// The watched directory.
    pub fn path(&self) -> &Path {
        &self.state.root
    }

    /// Whether events are still being delivered.
    pub fn is_active(&self) -> bool {
        self.watcher.is_some() && self.state.active.load(Ordering::Acquire)
    }

    /// Stop watching. Idempotent.
    pub fn stop(&mut self) {
        self.state.active.store(false, Ordering::Release);
        if let Some(mut watcher) = self.watcher.take() {
            if let Err(e) = watcher.unwatch(&self.state.root) {
                debug!("Unwatch failed for {}: {e}", self.state.root.display());
            }
            info!("Stopped watching: {}", self.state.root.display());
        }
    }
}

impl Drop for DirectoryWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for DirectoryWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryWatcher")
            .field("root", &self.state.root)
            .field("mask", &self.state.mask)
            .field("active", &self.is_active())
            .finish()
    }
}
