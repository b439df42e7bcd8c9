//! The provider contract.

use azimuth_launchable::Launchable;

use crate::notifier::ChangeSubscription;

/// A source of launchables.
pub trait LaunchableProvider: Send + Sync {
    /// Short name used in logs and listings.
    fn name(&self) -> &str;

    /// Whether the provider can contribute right now.
    fn is_available(&self) -> bool;

    /// The provider's current launchables, built fresh on each call.
    fn launchables(&self) -> Vec<Launchable>;

    /// Listen for changes to what [`LaunchableProvider::launchables`] returns.
    fn subscribe(&self) -> ChangeSubscription;
}
