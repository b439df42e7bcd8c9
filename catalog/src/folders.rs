//! Launchables from watched folders.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use azimuth_directory_watcher::{
    DirectoryScanner, DirectoryWatcher, FileEvent, WatchConfig, WatcherError,
};
use azimuth_launchable::{Identity, Launchable};
use chrono::TimeDelta;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::{CatalogConfig, FolderConfig};
use crate::debounce::PenaltyGate;
use crate::error::{CatalogError, Result};
use crate::notifier::{ChangeNotifier, ChangeSubscription};
use crate::provider::LaunchableProvider;

const NAME: &str = "folders";

struct WatchedFolder {
    config: FolderConfig,
    identity: Identity,
    scanner: DirectoryScanner,
    _watcher: DirectoryWatcher,
}

struct FolderState {
    folders: RwLock<Vec<WatchedFolder>>,
    gate: PenaltyGate,
    notifier: ChangeNotifier,
    closed: AtomicBool,
}

impl FolderState {
    fn on_file_changed(&self, event: &FileEvent) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }

        let entry = &event.entry;
        if entry.is_hidden || !entry.still_exists() {
            debug!("Ignoring {:?} on {}", event.kind, entry.path.display());
            return false;
        }
        if !self.gate.try_pass() {
            return false;
        }

        info!("Folder contents changed: {}", entry.path.display());
        self.notifier.notify()
    }
}

/// Exposes the files of a set of watched folders as launchables.
///
/// Each folder carries its own watcher. Any interesting change raises the
/// provider's change notification, at most once per penalty period.
/// Folders deleted on disk drop out of the set the next time
/// [`LaunchableProvider::launchables`] runs.
pub struct FolderProvider {
    state: Arc<FolderState>,
}

impl FolderProvider {
    /// Create a provider watching `folders`.
    ///
    /// Folders that cannot be watched are logged and skipped; a provider
    /// left with no folders reports itself unavailable.
    pub fn new(
        folders: impl IntoIterator<Item = FolderConfig>,
        penalty: TimeDelta,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let provider = Self {
            state: Arc::new(FolderState {
                folders: RwLock::new(Vec::new()),
                gate: PenaltyGate::new(penalty, clock),
                notifier: ChangeNotifier::new(NAME),
                closed: AtomicBool::new(false),
            }),
        };

        for folder in folders {
            let path = folder.path.clone();
            if let Err(e) = provider.add(folder) {
                warn!("Skipping folder {}: {e}", path.display());
            }
        }

        provider
    }

    /// Create a provider from the catalog's folder list and penalty period.
    pub fn from_config(config: &CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(config.folders.iter().cloned(), config.penalty_period(), clock)
    }

    /// Start watching `folder`.
    ///
    /// Returns `Ok(false)` when an equal folder is already watched.
    pub fn add(&self, folder: FolderConfig) -> Result<bool> {
        if self.state.closed.load(Ordering::Acquire) {
            return Err(CatalogError::Config(format!(
                "provider is shut down: {}",
                folder.path.display()
            )));
        }
        if !folder.path.is_dir() {
            return Err(CatalogError::Config(format!(
                "not a directory: {}",
                folder.path.display()
            )));
        }

        let identity = Identity::from_path(&folder.path);
        let mut folders = self.state.folders.write();
        if folders.iter().any(|f| f.identity == identity) {
            debug!("Folder already watched: {identity}");
            return Ok(false);
        }

        let mut watch = WatchConfig::new();
        if folder.scan.needs_recursive_watch() {
            watch = watch.recursive();
        }
        let weak: Weak<FolderState> = Arc::downgrade(&self.state);
        let watcher = DirectoryWatcher::watch(&folder.path, watch, move |event| {
            if let Some(state) = weak.upgrade() {
                state.on_file_changed(&event);
            }
        })?;

        info!("Added folder: {identity}");
        folders.push(WatchedFolder {
            scanner: DirectoryScanner::new(folder.scan.clone()),
            config: folder,
            identity,
            _watcher: watcher,
        });
        Ok(true)
    }

    /// Feed one raw filesystem event through the penalty gate.
    ///
    /// Returns true when the event raised a change notification.
    pub fn on_file_changed(&self, event: &FileEvent) -> bool {
        self.state.on_file_changed(event)
    }

    /// The watched folders, in insertion order.
    pub fn folders(&self) -> Vec<PathBuf> {
        self.state
            .folders
            .read()
            .iter()
            .map(|f| f.config.path.clone())
            .collect()
    }

    /// Number of watched folders.
    pub fn len(&self) -> usize {
        self.state.folders.read().len()
    }

    /// Whether no folders are watched.
    pub fn is_empty(&self) -> bool {
        self.state.folders.read().is_empty()
    }

    /// Stop all watchers. No notifications are raised afterwards.
    pub fn shutdown(&self) {
        if self.state.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.state.notifier.close();
        let stopped: Vec<WatchedFolder> = self.state.folders.write().drain(..).collect();
        info!("Folder provider shut down ({} folders)", stopped.len());
    }

    fn remove_vanished(&self, vanished: &[Identity]) {
        let mut folders = self.state.folders.write();
        folders.retain(|f| {
            let gone = vanished.contains(&f.identity) && !f.config.path.is_dir();
            if gone {
                info!("Folder no longer exists, removing: {}", f.identity);
            }
            !gone
        });
    }
}

impl LaunchableProvider for FolderProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        !self.state.closed.load(Ordering::Acquire) && !self.is_empty()
    }

    fn launchables(&self) -> Vec<Launchable> {
        let snapshot: Vec<(Identity, PathBuf, DirectoryScanner)> = self
            .state
            .folders
            .read()
            .iter()
            .map(|f| (f.identity.clone(), f.config.path.clone(), f.scanner.clone()))
            .collect();

        let mut launchables = Vec::new();
        let mut vanished = Vec::new();
        for (identity, path, scanner) in snapshot {
            match scanner.files(&path) {
                Ok(files) => launchables.extend(files.into_iter().map(Launchable::file)),
                Err(WatcherError::DirectoryNotFound(_)) => vanished.push(identity),
                Err(e) => warn!("Failed to enumerate {}: {e}", path.display()),
            }
        }

        if !vanished.is_empty() {
            self.remove_vanished(&vanished);
        }
        launchables
    }

    fn subscribe(&self) -> ChangeSubscription {
        self.state.notifier.subscribe()
    }
}

impl Drop for FolderProvider {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FolderProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderProvider")
            .field("folders", &self.folders())
            .field("gate", &self.state.gate)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use azimuth_directory_watcher::ChangeKind;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(DateTime::<Utc>::UNIX_EPOCH))
    }

    fn provider(folders: Vec<FolderConfig>, clock: &Arc<ManualClock>) -> FolderProvider {
        FolderProvider::new(
            folders,
            TimeDelta::minutes(10),
            Arc::clone(clock) as Arc<dyn Clock>,
        )
    }

    #[test]
    fn test_duplicate_folder_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let clock = manual_clock();
        let provider = provider(vec![FolderConfig::new(temp_dir.path())], &clock);

        assert!(!provider.add(FolderConfig::new(temp_dir.path())).unwrap());
        let with_slash = PathBuf::from(format!("{}/", temp_dir.path().display()));
        assert!(!provider.add(FolderConfig::new(with_slash)).unwrap());
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_invalid_folder_rejected() {
        let clock = manual_clock();
        let provider = provider(vec![FolderConfig::new("/nonexistent/path/12345")], &clock);

        assert!(provider.is_empty());
        assert!(!provider.is_available());
        let result = provider.add(FolderConfig::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_launchables_lists_files() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("Shows Desktop.lnk"), "").unwrap();
        std::fs::write(temp_dir.path().join(".hidden.lnk"), "").unwrap();
        let clock = manual_clock();
        let provider = provider(vec![FolderConfig::new(temp_dir.path())], &clock);

        let names: Vec<String> = provider
            .launchables()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["Shows Desktop"]);
    }

    #[test]
    fn test_gate_collapses_events() {
        let watched = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        let file = elsewhere.path().join("new.lnk");
        std::fs::write(&file, "").unwrap();

        let clock = manual_clock();
        let provider = provider(vec![FolderConfig::new(watched.path())], &clock);
        let subscription = provider.subscribe();
        let event = FileEvent::for_path(ChangeKind::Created, &file);

        assert!(provider.on_file_changed(&event));
        assert!(!provider.on_file_changed(&event));
        clock.advance(TimeDelta::minutes(5));
        assert!(!provider.on_file_changed(&event));
        assert!(subscription.has_changed());

        clock.advance(TimeDelta::minutes(6));
        assert!(provider.on_file_changed(&event));
    }

    #[test]
    fn test_uninteresting_events_do_not_consume_penalty() {
        let elsewhere = TempDir::new().unwrap();
        let hidden = elsewhere.path().join(".config");
        std::fs::write(&hidden, "").unwrap();
        let visible = elsewhere.path().join("app.desktop");
        std::fs::write(&visible, "").unwrap();

        let clock = manual_clock();
        let provider = provider(Vec::new(), &clock);

        assert!(!provider.on_file_changed(&FileEvent::for_path(ChangeKind::Created, &hidden)));
        assert!(!provider.on_file_changed(&FileEvent::for_path(
            ChangeKind::Deleted,
            elsewhere.path().join("gone.desktop"),
        )));
        assert!(provider.on_file_changed(&FileEvent::for_path(ChangeKind::Created, &visible)));
    }

    #[test]
    fn test_no_notifications_after_shutdown() {
        let elsewhere = TempDir::new().unwrap();
        let file = elsewhere.path().join("late.lnk");
        std::fs::write(&file, "").unwrap();

        let clock = manual_clock();
        let provider = provider(Vec::new(), &clock);
        let subscription = provider.subscribe();

        provider.shutdown();
        assert!(!provider.on_file_changed(&FileEvent::for_path(ChangeKind::Created, &file)));
        assert!(!subscription.has_changed());
        assert!(!provider.is_available());
        assert!(provider.add(FolderConfig::new(elsewhere.path())).is_err());
    }
}
