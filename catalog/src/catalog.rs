//! The aggregated catalog over all registered providers.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use azimuth_launchable::Launchable;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::bookmarks::BookmarkProvider;
use crate::clock::Clock;
use crate::config::CatalogConfig;
use crate::folders::FolderProvider;
use crate::notifier::ChangeSubscription;
use crate::provider::LaunchableProvider;
use crate::shortcuts::ShortcutProvider;

struct Registered {
    provider: Arc<dyn LaunchableProvider>,
    subscription: Mutex<ChangeSubscription>,
}

/// Ordered set of providers, aggregated into one catalog.
///
/// Change propagation is level-triggered: any provider firing marks the
/// cached snapshot stale, and the next [`Catalog::snapshot`] recomputes it
/// once no matter how many notifications arrived in between.
pub struct Catalog {
    providers: RwLock<Vec<Registered>>,
    dedupe: bool,
    cache: Mutex<Option<Arc<[Launchable]>>>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new(dedupe: bool) -> Self {
        Self {
            providers: RwLock::new(Vec::new()),
            dedupe,
            cache: Mutex::new(None),
        }
    }

    /// Build the folder, shortcut and bookmark providers `config` describes.
    pub fn from_config(config: &CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        let catalog = Self::new(config.dedupe);
        catalog.register(Arc::new(FolderProvider::from_config(config, clock)));
        catalog.register(Arc::new(ShortcutProvider::new(config.shortcuts.clone())));
        if let Some(folder) = &config.bookmarks {
            catalog.register(Arc::new(BookmarkProvider::new(folder)));
        }
        catalog
    }

    /// Append a provider.
    pub fn register(&self, provider: Arc<dyn LaunchableProvider>) {
        let subscription = Mutex::new(provider.subscribe());
        info!("Registered provider: {}", provider.name());
        self.providers.write().push(Registered {
            provider,
            subscription,
        });
        self.invalidate();
    }

    /// Remove every provider named `name`. Returns whether any was removed.
    pub fn unregister(&self, name: &str) -> bool {
        let removed = {
            let mut providers = self.providers.write();
            let before = providers.len();
            providers.retain(|r| r.provider.name() != name);
            before != providers.len()
        };
        if removed {
            info!("Unregistered provider: {name}");
            self.invalidate();
        }
        removed
    }

    /// Registered providers in registration order.
    pub fn providers(&self) -> Vec<Arc<dyn LaunchableProvider>> {
        self.providers
            .read()
            .iter()
            .map(|r| Arc::clone(&r.provider))
            .collect()
    }

    /// Whether duplicate identities are collapsed.
    pub fn dedupes(&self) -> bool {
        self.dedupe
    }

    /// Current launchables of every available provider, in provider order.
    pub fn launchables(&self) -> Vec<Launchable> {
        let launchables: Vec<Launchable> = self
            .launchables_by_provider()
            .into_iter()
            .flat_map(|(_, launchables)| launchables)
            .collect();

        if self.dedupe {
            dedupe(launchables)
        } else {
            launchables
        }
    }

    /// Current launchables grouped under each available provider's name.
    ///
    /// Never deduplicated.
    pub fn launchables_by_provider(&self) -> Vec<(String, Vec<Launchable>)> {
        self.providers()
            .into_iter()
            .filter(|provider| {
                let available = provider.is_available();
                if !available {
                    debug!("Provider unavailable: {}", provider.name());
                }
                available
            })
            .map(|provider| (provider.name().to_string(), provider.launchables()))
            .collect()
    }

    /// Whether the next snapshot will be recomputed.
    pub fn is_stale(&self) -> bool {
        self.cache.lock().is_none() || self.any_changed()
    }

    /// The current catalog, recomputed only when stale.
    pub fn snapshot(&self) -> Arc<[Launchable]> {
        let mut cache = self.cache.lock();
        if let Some(snapshot) = cache.as_ref() {
            if !self.any_changed() {
                return Arc::clone(snapshot);
            }
        }

        for registered in self.providers.read().iter() {
            registered.subscription.lock().acknowledge();
        }

        let started = Instant::now();
        let snapshot: Arc<[Launchable]> = self.launchables().into();
        info!(
            "Catalog refreshed: {} launchables in {:?}",
            snapshot.len(),
            started.elapsed()
        );
        *cache = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drop the cached snapshot.
    pub fn invalidate(&self) {
        *self.cache.lock() = None;
    }

    /// Fresh subscriptions to every registered provider.
    pub fn subscriptions(&self) -> Vec<ChangeSubscription> {
        self.providers
            .read()
            .iter()
            .map(|r| r.provider.subscribe())
            .collect()
    }

    fn any_changed(&self) -> bool {
        self.providers
            .read()
            .iter()
            .any(|r| r.subscription.lock().has_changed())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self
            .providers
            .read()
            .iter()
            .map(|r| r.provider.name().to_string())
            .collect();
        f.debug_struct("Catalog")
            .field("providers", &names)
            .field("dedupe", &self.dedupe)
            .finish()
    }
}

fn dedupe(launchables: Vec<Launchable>) -> Vec<Launchable> {
    let mut seen = HashSet::new();
    launchables
        .into_iter()
        .filter(|l| seen.insert(l.identity().clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::ChangeNotifier;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct FixedProvider {
        name: &'static str,
        available: AtomicBool,
        launchables: Vec<Launchable>,
        enumerations: AtomicUsize,
        notifier: ChangeNotifier,
    }

    impl FixedProvider {
        fn new(name: &'static str, launchables: Vec<Launchable>) -> Arc<Self> {
            Arc::new(Self {
                name,
                available: AtomicBool::new(true),
                launchables,
                enumerations: AtomicUsize::new(0),
                notifier: ChangeNotifier::new(name),
            })
        }
    }

    impl LaunchableProvider for FixedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available.load(Ordering::SeqCst)
        }

        fn launchables(&self) -> Vec<Launchable> {
            self.enumerations.fetch_add(1, Ordering::SeqCst);
            self.launchables.clone()
        }

        fn subscribe(&self) -> ChangeSubscription {
            self.notifier.subscribe()
        }
    }

    fn names(launchables: &[Launchable]) -> Vec<&str> {
        launchables.iter().map(Launchable::name).collect()
    }

    #[test]
    fn test_concatenates_in_provider_order() {
        let catalog = Catalog::default();
        catalog.register(FixedProvider::new(
            "a",
            vec![Launchable::shortcut("One", "one")],
        ));
        catalog.register(FixedProvider::new(
            "b",
            vec![Launchable::shortcut("Two", "two")],
        ));

        assert_eq!(names(&catalog.launchables()), vec!["One", "Two"]);
    }

    #[test]
    fn test_unavailable_provider_contributes_nothing() {
        let catalog = Catalog::default();
        let offline = FixedProvider::new("offline", vec![Launchable::shortcut("Gone", "gone")]);
        offline.available.store(false, Ordering::SeqCst);
        catalog.register(offline.clone());

        assert!(catalog.launchables().is_empty());
        assert_eq!(offline.enumerations.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_duplicates_kept_unless_deduped() {
        let same = || vec![Launchable::shortcut("Editor", "vim")];

        let catalog = Catalog::new(false);
        catalog.register(FixedProvider::new("a", same()));
        catalog.register(FixedProvider::new("b", same()));
        assert_eq!(catalog.launchables().len(), 2);

        let catalog = Catalog::new(true);
        catalog.register(FixedProvider::new("a", same()));
        catalog.register(FixedProvider::new("b", same()));
        assert_eq!(catalog.launchables().len(), 1);
    }

    #[test]
    fn test_snapshot_recomputes_only_when_stale() {
        let catalog = Catalog::default();
        let provider = FixedProvider::new("a", vec![Launchable::shortcut("One", "one")]);
        catalog.register(provider.clone());

        assert!(catalog.is_stale());
        let first = catalog.snapshot();
        let second = catalog.snapshot();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(provider.enumerations.load(Ordering::SeqCst), 1);

        provider.notifier.notify();
        provider.notifier.notify();
        assert!(catalog.is_stale());
        catalog.snapshot();
        assert!(!catalog.is_stale());
        assert_eq!(provider.enumerations.load(Ordering::SeqCst), 2);

        catalog.invalidate();
        catalog.snapshot();
        assert_eq!(provider.enumerations.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_unregister() {
        let catalog = Catalog::default();
        catalog.register(FixedProvider::new("a", vec![Launchable::shortcut("One", "one")]));

        assert!(catalog.unregister("a"));
        assert!(!catalog.unregister("a"));
        assert!(catalog.snapshot().is_empty());
    }
}
