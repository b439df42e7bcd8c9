//! The launcher's TOML configuration file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use azimuth_catalog::CatalogConfig;
use azimuth_resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything `config.toml` can set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Launch history file (default: `<config_dir>/azimuth/history.json`).
    pub history_path: Option<PathBuf>,

    pub catalog: CatalogConfig,

    pub resolver: ResolverConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            history_path: None,
            catalog: CatalogConfig::default(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl LauncherConfig {
    /// `<config_dir>/azimuth/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azimuth").join("config.toml"))
    }

    /// Load from `explicit`, or from the default location.
    ///
    /// A missing default file yields defaults; a missing explicit file or a
    /// malformed one is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = LauncherConfig::from_toml("").unwrap();
        assert_eq!(config, LauncherConfig::default());
    }

    #[test]
    fn test_full_file() {
        let config = LauncherConfig::from_toml(
            r#"
log_level = "debug"
history_path = "/home/me/.azimuth-history.json"

[catalog]
penalty_secs = 30
dedupe = true
bookmarks = "/home/me/Favorites"

[[catalog.folders]]
path = "/home/me/.local/share/applications"

[[catalog.folders]]
path = "/opt/tools"
max_depth = 2
include_hidden = true

[catalog.shortcuts]
special_folders = false
commands = [{ name = "Terminal", command = "xterm -e bash" }]

[resolver]
max_results = 10
history_boost = 0.5
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.history_path,
            Some(PathBuf::from("/home/me/.azimuth-history.json"))
        );
        assert_eq!(config.catalog.penalty_secs, 30);
        assert!(config.catalog.dedupe);
        assert_eq!(config.catalog.folders.len(), 2);
        assert_eq!(config.catalog.folders[1].scan.max_depth, 2);
        assert!(config.catalog.folders[1].scan.include_hidden);
        assert!(!config.catalog.shortcuts.special_folders);
        assert_eq!(config.catalog.shortcuts.commands[0].name, "Terminal");
        assert_eq!(config.resolver.max_results, 10);
        assert_eq!(config.resolver.min_score, 0);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[catalog\npenalty_secs = ").unwrap();

        assert!(LauncherConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(LauncherConfig::load(Some(&temp_dir.path().join("absent.toml"))).is_err());
    }
}
