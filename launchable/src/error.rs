//! Error types for launching.

use thiserror::Error;

/// Result type alias for launch operations.
pub type Result<T> = std::result::Result<T, LaunchError>;

/// Errors that can occur while building or launching a launchable.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The process could not be started.
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The platform opener refused the target.
    #[error("failed to open {target}: {source}")]
    Open {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Arguments could not be split into words.
    #[error("invalid launch arguments: {0}")]
    InvalidArguments(String),

    /// An Internet shortcut without a usable URL.
    #[error("invalid internet shortcut: {0}")]
    InvalidShortcut(String),
}
