//! Find and launch over a live catalog.

use std::sync::Arc;

use azimuth_catalog::Catalog;
use azimuth_launchable::Launchable;
use tracing::info;

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::history::{FrecencyHistory, HistoryLookup};
use crate::resolver::{Match, Resolver};

/// Ties a catalog, a resolver and a history store together.
#[derive(Debug)]
pub struct Finder {
    catalog: Arc<Catalog>,
    resolver: Resolver,
    history: Arc<FrecencyHistory>,
}

impl Finder {
    pub fn new(catalog: Arc<Catalog>, config: ResolverConfig, history: Arc<FrecencyHistory>) -> Self {
        let lookup: Arc<dyn HistoryLookup> = history.clone();
        Self {
            catalog,
            resolver: Resolver::new(config, lookup),
            history,
        }
    }

    /// Launchables matching `query`, best first.
    pub fn find(&self, query: &str) -> Vec<Launchable> {
        self.find_matches(query)
            .into_iter()
            .map(|m| m.launchable)
            .collect()
    }

    /// Matches for `query` against the current snapshot, with scores.
    pub fn find_matches(&self, query: &str) -> Vec<Match> {
        let snapshot = self.catalog.snapshot();
        self.resolver.find(query, &snapshot)
    }

    /// Launch `launchable` and record the use when it keeps history.
    pub fn launch(&self, launchable: &Launchable, arguments: &str) -> Result<()> {
        launchable.launch(arguments)?;
        info!("Launched {launchable}");
        if launchable.should_store_history() {
            self.history.record(launchable.identity());
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn history(&self) -> &Arc<FrecencyHistory> {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolverError;
    use azimuth_catalog::{DeviceInfo, DeviceProvider, StaticDeviceSource};

    #[test]
    fn test_failed_launch_records_nothing() {
        let finder = Finder::new(
            Arc::new(Catalog::default()),
            ResolverConfig::new(),
            Arc::new(FrecencyHistory::new()),
        );
        let broken = Launchable::shortcut("Broken", "echo \"unterminated");

        let result = finder.launch(&broken, "");
        assert!(matches!(result, Err(ResolverError::Launch(_))));
        assert!(finder.history().is_empty());
    }

    #[test]
    fn test_find_reads_catalog() {
        let catalog = Arc::new(Catalog::default());
        catalog.register(Arc::new(DeviceProvider::new(Arc::new(
            StaticDeviceSource::new(vec![DeviceInfo::new("Card Reader", "/dev/mmcblk0")]),
        ))));
        let finder = Finder::new(catalog, ResolverConfig::new(), Arc::new(FrecencyHistory::new()));

        let found = finder.find("card");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Card Reader");
    }
}
