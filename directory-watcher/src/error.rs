//! Error types for the directory watcher.

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Errors that can occur in the directory watcher.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Directory not found.
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// The path is not a watchable directory.
    #[error("configuration error: {0}")]
    Config(String),

    /// The platform watcher failed.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),
}
