//! Error types for the resolver.

use thiserror::Error;

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, ResolverError>;

/// Errors that can occur while acting on resolved results.
///
/// Resolving itself never fails; no query string is rejected.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Launching a result failed.
    #[error("launch failed: {0}")]
    Launch(#[from] azimuth_launchable::LaunchError),
}
