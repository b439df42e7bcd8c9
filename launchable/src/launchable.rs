//! The launchable value.

use std::ffi::OsStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::identity::Identity;
use crate::runner::{Runner, open_target};

/// What a launchable points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LaunchableKind {
    /// A regular file (documents, executables, `.lnk`/`.desktop` entries).
    File { path: PathBuf },

    /// A directory, opened in the file manager.
    Folder { path: PathBuf },

    /// A named command line.
    Shortcut { command: String },

    /// A web address.
    Bookmark { url: String },

    /// A hardware device exposed by the platform layer.
    Device { device_path: String },
}

/// A single candidate result a user can invoke.
///
/// Values are created fresh on every provider enumeration and never mutated
/// afterwards. Two launchables are equal iff their [`Identity`] is equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Launchable {
    name: String,
    identity: Identity,
    kind: LaunchableKind,
}

impl Launchable {
    /// A file, named after its stem (`Shows Desktop.lnk` is "Shows Desktop").
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .or_else(|| path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            identity: Identity::from_path(&path),
            kind: LaunchableKind::File { path },
        }
    }

    /// A folder, named after its last component.
    pub fn folder(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            identity: Identity::from_path(&path),
            kind: LaunchableKind::Folder { path },
        }
    }

    /// A named command.
    pub fn shortcut(name: impl Into<String>, command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            name: name.into(),
            identity: Identity::from_target(&command),
            kind: LaunchableKind::Shortcut { command },
        }
    }

    /// A named URL.
    pub fn bookmark(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: name.into(),
            identity: Identity::from_target(&url),
            kind: LaunchableKind::Bookmark { url },
        }
    }

    /// A device addressed by its platform device path.
    pub fn device(name: impl Into<String>, device_path: impl Into<String>) -> Self {
        let device_path = device_path.into();
        Self {
            name: name.into(),
            identity: Identity::from_target(&device_path),
            kind: LaunchableKind::Device { device_path },
        }
    }

    /// Display name, the text queries are matched against.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved target used for equality.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The variant and its payload.
    pub fn kind(&self) -> &LaunchableKind {
        &self.kind
    }

    /// Filesystem path for file and folder launchables.
    pub fn path(&self) -> Option<&Path> {
        match &self.kind {
            LaunchableKind::File { path } | LaunchableKind::Folder { path } => Some(path),
            _ => None,
        }
    }

    /// Whether launching this should be recorded in usage history.
    pub fn should_store_history(&self) -> bool {
        !matches!(self.kind, LaunchableKind::Device { .. })
    }

    /// Launch with the given argument string.
    ///
    /// Files with arguments and shortcuts are spawned as processes; everything
    /// else goes through the platform opener. The started process is not
    /// supervised.
    pub fn launch(&self, arguments: &str) -> Result<()> {
        debug!("Launching {} ({})", self.name, self.identity);

        match &self.kind {
            LaunchableKind::File { path } if !arguments.trim().is_empty() => {
                Runner::new(path.to_string_lossy(), arguments)?.spawn_detached()
            }
            LaunchableKind::File { path } | LaunchableKind::Folder { path } => {
                open_target(path.as_os_str())
            }
            LaunchableKind::Shortcut { command } => {
                Runner::from_command(command, arguments)?.spawn_detached()
            }
            LaunchableKind::Bookmark { url } => open_target(OsStr::new(url)),
            LaunchableKind::Device { device_path } => open_target(OsStr::new(device_path)),
        }
    }
}

impl PartialEq for Launchable {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for Launchable {}

impl Hash for Launchable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Display for Launchable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LaunchableKind::File { .. } | LaunchableKind::Folder { .. } => {
                write!(f, "{}", self.name)
            }
            LaunchableKind::Shortcut { .. } => write!(f, "Shortcut to {}", self.name),
            LaunchableKind::Bookmark { .. } => write!(f, "Bookmark {}", self.name),
            LaunchableKind::Device { .. } => write!(f, "Device {}", self.name),
        }
    }
}
