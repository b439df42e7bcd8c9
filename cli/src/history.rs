//! Launch history kept between runs.

use std::path::{Path, PathBuf};

use anyhow::Context;
use azimuth_launchable::Identity;
use azimuth_resolver::{FrecencyHistory, UsageEntry};
use chrono::TimeDelta;
use tracing::{debug, warn};

/// Entries unused for this many days are dropped on load.
const MAX_AGE_DAYS: i64 = 90;

/// A JSON file holding a [`FrecencyHistory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    path: PathBuf,
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config_dir>/azimuth/history.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azimuth").join("history.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored history.
    ///
    /// A missing file gives an empty history. An unreadable or corrupt one
    /// is logged and replaced by an empty history.
    pub fn load(&self) -> FrecencyHistory {
        let history = FrecencyHistory::new();
        if !self.path.exists() {
            debug!("No history at {}", self.path.display());
            return history;
        }

        match self.read() {
            Ok(entries) => history.restore(entries),
            Err(e) => warn!("Ignoring history: {e:#}"),
        }
        let pruned = history.prune_older_than(TimeDelta::days(MAX_AGE_DAYS));
        if pruned > 0 {
            debug!("Pruned {pruned} stale history entries");
        }
        history
    }

    /// Write `history`, creating the parent directory when needed.
    pub fn save(&self, history: &FrecencyHistory) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&history.entries())?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!("Saved {} history entries", history.len());
        Ok(())
    }

    fn read(&self) -> anyhow::Result<Vec<(Identity, UsageEntry)>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid history in {}", self.path.display()))
    }
}
