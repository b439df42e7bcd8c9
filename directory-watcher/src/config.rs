//! Configuration types for watching and scanning directories.

use serde::{Deserialize, Serialize};

use crate::event::ChangeMask;

/// Configuration for a single watch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Change kinds to report.
    pub mask: ChangeMask,

    /// Whether to watch subdirectories too.
    pub recursive: bool,
}

impl WatchConfig {
    /// Create a config with the default mask (created, deleted, renamed).
    pub fn new() -> Self {
        Self {
            mask: ChangeMask::default(),
            recursive: false,
        }
    }

    /// Set the change mask.
    pub fn with_mask(mut self, mask: ChangeMask) -> Self {
        self.mask = mask;
        self
    }

    /// Watch subdirectories too.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for enumerating a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum depth to descend; 1 lists immediate contents only.
    pub max_depth: usize,

    /// Whether hidden files are listed.
    pub include_hidden: bool,

    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl ScanConfig {
    /// Create a config listing immediate, visible contents.
    pub fn new() -> Self {
        Self {
            max_depth: 1,
            include_hidden: false,
            follow_symlinks: false,
        }
    }

    /// Set the maximum depth (clamped to at least 1).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// List hidden files too.
    pub fn include_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }

    /// Enable following symbolic links.
    pub fn follow_symlinks(mut self) -> Self {
        self.follow_symlinks = true;
        self
    }

    /// Whether a watch over this scan needs to be recursive.
    pub fn needs_recursive_watch(&self) -> bool {
        self.max_depth > 1
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}
