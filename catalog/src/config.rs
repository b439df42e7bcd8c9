//! Catalog configuration.

use std::path::PathBuf;

use azimuth_directory_watcher::ScanConfig;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Default penalty period between folder change notifications.
pub const DEFAULT_PENALTY_SECS: u64 = 600;

/// A folder whose files become launchables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Directory to watch.
    pub path: PathBuf,

    /// How the directory is enumerated.
    #[serde(flatten)]
    pub scan: ScanConfig,
}

impl FolderConfig {
    /// Watch `path`, listing its immediate visible files.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scan: ScanConfig::default(),
        }
    }

    /// Set the enumeration depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.scan = self.scan.with_max_depth(depth);
        self
    }

    /// List hidden files too.
    pub fn include_hidden(mut self) -> Self {
        self.scan = self.scan.include_hidden();
        self
    }
}

/// A named command line shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandShortcut {
    pub name: String,
    pub command: String,
}

impl CommandShortcut {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// Options for the shortcut provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Whether the user's well-known folders are offered.
    pub special_folders: bool,

    /// Extra command shortcuts.
    pub commands: Vec<CommandShortcut>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            special_folders: true,
            commands: default_commands(),
        }
    }
}

#[cfg(windows)]
fn default_commands() -> Vec<CommandShortcut> {
    vec![
        CommandShortcut::new("Add or Remove Programs", "control appwiz.cpl"),
        CommandShortcut::new("Windows Explorer", "explorer.exe"),
    ]
}

#[cfg(not(windows))]
fn default_commands() -> Vec<CommandShortcut> {
    Vec::new()
}

/// Configuration for the aggregated catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Folders whose files are launchable.
    pub folders: Vec<FolderConfig>,

    /// Seconds between accepted folder change notifications.
    pub penalty_secs: u64,

    /// Keep only the first launchable per identity.
    pub dedupe: bool,

    /// Shortcut provider options.
    pub shortcuts: ShortcutConfig,

    /// Folder of `.url` bookmarks.
    pub bookmarks: Option<PathBuf>,
}

impl CatalogConfig {
    /// Create a config with the platform's default folders.
    pub fn new() -> Self {
        Self {
            folders: default_folders(),
            penalty_secs: DEFAULT_PENALTY_SECS,
            dedupe: false,
            shortcuts: ShortcutConfig::default(),
            bookmarks: default_bookmarks(),
        }
    }

    /// Create a config with no folders, shortcuts or bookmarks.
    pub fn empty() -> Self {
        Self {
            folders: Vec::new(),
            penalty_secs: DEFAULT_PENALTY_SECS,
            dedupe: false,
            shortcuts: ShortcutConfig {
                special_folders: false,
                commands: Vec::new(),
            },
            bookmarks: None,
        }
    }

    /// Add a folder.
    pub fn with_folder(mut self, folder: FolderConfig) -> Self {
        self.folders.push(folder);
        self
    }

    /// Set the penalty period in seconds.
    pub fn with_penalty_secs(mut self, secs: u64) -> Self {
        self.penalty_secs = secs;
        self
    }

    /// Enable deduplication by identity.
    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Set the bookmark folder.
    pub fn with_bookmarks(mut self, folder: impl Into<PathBuf>) -> Self {
        self.bookmarks = Some(folder.into());
        self
    }

    /// The penalty period.
    pub fn penalty_period(&self) -> TimeDelta {
        i64::try_from(self.penalty_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn existing(paths: impl IntoIterator<Item = PathBuf>) -> Vec<FolderConfig> {
    paths
        .into_iter()
        .filter(|p| p.is_dir())
        .map(FolderConfig::new)
        .collect()
}

#[cfg(windows)]
fn default_folders() -> Vec<FolderConfig> {
    let mut paths = Vec::new();
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join(r"Microsoft\Internet Explorer\Quick Launch"));
        paths.push(config.join(r"Microsoft\Windows\Start Menu\Programs"));
    }
    existing(paths)
}

#[cfg(target_os = "macos")]
fn default_folders() -> Vec<FolderConfig> {
    let mut paths = vec![PathBuf::from("/Applications")];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("Applications"));
    }
    existing(paths)
}

#[cfg(not(any(windows, target_os = "macos")))]
fn default_folders() -> Vec<FolderConfig> {
    let mut paths = Vec::new();
    if let Some(data) = dirs::data_dir() {
        paths.push(data.join("applications"));
    }
    paths.push(PathBuf::from("/usr/share/applications"));
    existing(paths)
}

#[cfg(windows)]
fn default_bookmarks() -> Option<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join("Favorites"))
        .filter(|p| p.is_dir())
}

#[cfg(not(windows))]
fn default_bookmarks() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::empty();
        assert_eq!(config.penalty_period(), TimeDelta::minutes(10));
        assert!(!config.dedupe);
        assert!(config.folders.is_empty());
    }

    #[test]
    fn test_huge_penalty_saturates() {
        let config = CatalogConfig::empty().with_penalty_secs(u64::MAX);
        assert_eq!(config.penalty_period(), TimeDelta::MAX);
    }

    #[test]
    fn test_folder_config_flattens_scan_options() {
        let folder: FolderConfig =
            serde_json::from_str(r#"{"path": "/opt/apps", "max_depth": 2}"#).unwrap();
        assert_eq!(folder.path, PathBuf::from("/opt/apps"));
        assert_eq!(folder.scan.max_depth, 2);
        assert!(!folder.scan.include_hidden);
    }
}
