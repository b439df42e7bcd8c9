//! The `find`, `list` and `watch` commands.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use azimuth_catalog::Catalog;
use azimuth_resolver::{Finder, Match};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Print the ranked matches for `query`.
pub fn find(
    finder: &Finder,
    query: &str,
    limit: Option<usize>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<Vec<Match>> {
    let mut matches = finder.find_matches(query);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &matches)?;
        writeln!(out)?;
    } else if matches.is_empty() {
        writeln!(out, "No results for '{query}'")?;
    } else {
        for m in &matches {
            writeln!(
                out,
                "{:>7} {:>10.1}  {:<32} {}",
                m.score,
                m.rank,
                m.launchable.name(),
                m.launchable.identity()
            )?;
        }
    }
    Ok(matches)
}

/// Print every launchable, grouped by provider.
pub fn list(catalog: &Catalog, out: &mut impl Write) -> anyhow::Result<usize> {
    let mut total = 0;
    for (provider, launchables) in catalog.launchables_by_provider() {
        writeln!(out, "{provider} ({})", launchables.len())?;
        for launchable in &launchables {
            writeln!(out, "  {:<32} {}", launchable.name(), launchable.identity())?;
        }
        total += launchables.len();
    }
    Ok(total)
}

/// Log each provider change until Ctrl-C.
pub async fn watch(catalog: Arc<Catalog>) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let subscriptions = catalog.subscriptions();
    let providers = subscriptions.len();
    for mut subscription in subscriptions {
        let tx = tx.clone();
        tokio::spawn(async move {
            while subscription.changed().await {
                if tx.send(subscription.source().to_string()).is_err() {
                    break;
                }
            }
        });
    }
    drop(tx);

    let initial = catalog.snapshot();
    info!(
        "Watching {providers} providers ({} launchables), Ctrl-C to stop",
        initial.len()
    );

    loop {
        tokio::select! {
            source = rx.recv() => {
                let Some(source) = source else {
                    warn!("All providers closed");
                    break;
                };
                let snapshot = catalog.snapshot();
                info!("{source} changed, catalog holds {} launchables", snapshot.len());
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl-C")?;
                info!("Stopping");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use azimuth_catalog::{CatalogConfig, CommandShortcut, ShortcutConfig, SystemClock};
    use azimuth_resolver::{FrecencyHistory, ResolverConfig};
    use pretty_assertions::assert_eq;

    fn catalog() -> Arc<Catalog> {
        let mut config = CatalogConfig::empty();
        config.shortcuts = ShortcutConfig {
            special_folders: false,
            commands: vec![
                CommandShortcut::new("Terminal", "xterm"),
                CommandShortcut::new("Text Editor", "gedit"),
            ],
        };
        Arc::new(Catalog::from_config(&config, Arc::new(SystemClock)))
    }

    #[test]
    fn test_find_prints_matches() {
        let finder = Finder::new(
            catalog(),
            ResolverConfig::new(),
            Arc::new(FrecencyHistory::new()),
        );
        let mut out = Vec::new();

        let matches = find(&finder, "term", None, false, &mut out).unwrap();
        assert_eq!(matches.len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Terminal"));
        assert!(!text.contains("Text Editor"));
    }

    #[test]
    fn test_find_json() {
        let finder = Finder::new(
            catalog(),
            ResolverConfig::new(),
            Arc::new(FrecencyHistory::new()),
        );
        let mut out = Vec::new();

        find(&finder, "+", Some(1), true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_list_groups_by_provider() {
        let mut out = Vec::new();
        let total = list(&catalog(), &mut out).unwrap();

        assert_eq!(total, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("shortcuts (2)"));
    }
}
