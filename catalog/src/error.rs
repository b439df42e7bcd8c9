//! Error types for the catalog.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while building or refreshing the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A provider was pointed at a resource it cannot use.
    #[error("configuration error: {0}")]
    Config(String),

    /// Watcher error.
    #[error("watcher error: {0}")]
    Watcher(#[from] azimuth_directory_watcher::WatcherError),

    /// The device layer failed to enumerate.
    #[error("device enumeration failed: {0}")]
    Device(String),
}
