//! Normalized identity strings.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// The resolved target of a launchable.
///
/// Equality and hashing of launchables go through this value only, so it is
/// normalized once at construction: paths are resolved to absolute form
/// (symlinks followed when the path exists) and trailing separators are
/// dropped. On Windows paths compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Identity of a filesystem path.
    pub fn from_path(path: &Path) -> Self {
        let resolved = dunce::canonicalize(path)
            .or_else(|_| std::path::absolute(path))
            .unwrap_or_else(|_| path.to_path_buf());

        let text = trim_separators(&resolved.to_string_lossy()).to_string();

        #[cfg(windows)]
        let text = text.to_lowercase();

        Self(text)
    }

    /// Identity of a non-path target such as a URL or a command.
    pub fn from_target(target: &str) -> Self {
        Self(target.trim().to_string())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn trim_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    // Keep roots such as "/" and "C:\" intact.
    if trimmed.is_empty() || trimmed.ends_with(':') {
        path
    } else {
        trimmed
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
