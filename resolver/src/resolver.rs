//! Query resolution over a catalog snapshot.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use azimuth_launchable::Launchable;
use serde::Serialize;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::history::{HistoryLookup, NoHistory};
use crate::normalize::Query;
use crate::scoring::Scorer;

/// History weight at which the boost reaches half its maximum.
const HISTORY_HALF_WEIGHT: f64 = 50.0;

/// A candidate that matched a query.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub launchable: Launchable,

    /// Text relevance.
    pub score: i64,

    /// Usage weight from history.
    pub history_weight: f64,

    /// Final ordering key: score lifted by history.
    pub rank: f64,
}

/// Maps a query to an ordered list of matches.
///
/// Never fails: an empty result is simply "no matches". For a fixed
/// snapshot, query and history the output is always the same.
pub struct Resolver {
    config: ResolverConfig,
    scorer: Scorer,
    history: Arc<dyn HistoryLookup>,
}

impl Resolver {
    pub fn new(config: ResolverConfig, history: Arc<dyn HistoryLookup>) -> Self {
        Self {
            config,
            scorer: Scorer::new(),
            history,
        }
    }

    /// A resolver that ignores history.
    pub fn without_history(config: ResolverConfig) -> Self {
        Self::new(config, Arc::new(NoHistory))
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Rank `candidates` against `query`.
    pub fn find(&self, query: &str, candidates: &[Launchable]) -> Vec<Match> {
        let started = Instant::now();
        let query = Query::parse(query);

        let mut matches: Vec<(usize, Match)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, launchable)| {
                let score = self.scorer.score(launchable.name(), &query)?;
                if score < self.config.min_score {
                    return None;
                }
                let history_weight = self.history.weight_for(launchable.identity()).max(0.0);
                Some((
                    index,
                    Match {
                        launchable: launchable.clone(),
                        score,
                        history_weight,
                        rank: self.rank(score, history_weight),
                    },
                ))
            })
            .collect();

        matches.sort_by(compare);
        if self.config.max_results > 0 {
            matches.truncate(self.config.max_results);
        }

        debug!(
            "Resolved {:?} to {} of {} candidates in {:?}",
            query.raw(),
            matches.len(),
            candidates.len(),
            started.elapsed()
        );
        matches.into_iter().map(|(_, m)| m).collect()
    }

    fn rank(&self, score: i64, history_weight: f64) -> f64 {
        let lift = history_weight / (history_weight + HISTORY_HALF_WEIGHT);
        score as f64 * (1.0 + self.config.history_boost * lift)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Rank, then history, then name, then identity, then input order.
fn compare(a: &(usize, Match), b: &(usize, Match)) -> Ordering {
    let (a_index, a) = a;
    let (b_index, b) = b;
    b.rank
        .total_cmp(&a.rank)
        .then_with(|| b.history_weight.total_cmp(&a.history_weight))
        .then_with(|| {
            a.launchable
                .name()
                .to_lowercase()
                .cmp(&b.launchable.name().to_lowercase())
        })
        .then_with(|| a.launchable.identity().cmp(b.launchable.identity()))
        .then_with(|| a_index.cmp(b_index))
}
