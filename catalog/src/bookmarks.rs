//! Internet shortcuts from a favourites folder.

use std::path::{Path, PathBuf};

use azimuth_launchable::{Launchable, create_bookmark};
use tracing::{debug, warn};

use crate::notifier::{ChangeNotifier, ChangeSubscription};
use crate::provider::LaunchableProvider;

const NAME: &str = "bookmarks";

/// Reads every `.url` file in one folder.
#[derive(Debug)]
pub struct BookmarkProvider {
    folder: PathBuf,
    notifier: ChangeNotifier,
}

impl BookmarkProvider {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            notifier: ChangeNotifier::new(NAME),
        }
    }

    /// The favourites folder.
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn read(path: &Path) -> Option<Launchable> {
        let name = path.file_stem()?.to_string_lossy();
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read bookmark {}: {e}", path.display());
                return None;
            }
        };
        match create_bookmark(&name, &contents) {
            Ok(bookmark) => Some(bookmark),
            Err(e) => {
                warn!("Skipping bookmark {}: {e}", path.display());
                None
            }
        }
    }
}

fn is_url_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("url"))
}

impl LaunchableProvider for BookmarkProvider {
    fn name(&self) -> &str {
        NAME
    }

    fn is_available(&self) -> bool {
        self.folder.is_dir()
    }

    fn launchables(&self) -> Vec<Launchable> {
        let entries = match std::fs::read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot read bookmarks in {}: {e}", self.folder.display());
                return Vec::new();
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_url_file(path))
            .collect();
        paths.sort();

        paths.into_iter().filter_map(|path| Self::read(&path)).collect()
    }

    fn subscribe(&self) -> ChangeSubscription {
        self.notifier.subscribe()
    }
}
