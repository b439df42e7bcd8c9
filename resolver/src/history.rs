//! Usage history weighting.
//!
//! Weights combine how often and how recently something was launched:
//!
//! ```text
//! weight = 0.4 × ln(count + 1) × 10 + 0.6 × e^(-λ × age_days) × 100
//! λ      = ln(2) / 14
//! ```
//!
//! With a 14-day half-life, a launch two weeks ago carries half the recency
//! weight of one today.

use std::collections::HashMap;
use std::sync::Arc;

use azimuth_catalog::{Clock, SystemClock};
use azimuth_launchable::Identity;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Half-life in days of the recency component.
const HALF_LIFE_DAYS: f64 = 14.0;

const LAMBDA: f64 = std::f64::consts::LN_2 / HALF_LIFE_DAYS;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Read-only lookup of prior usage.
pub trait HistoryLookup: Send + Sync {
    /// Weight for `identity`; 0 when it was never used.
    fn weight_for(&self, identity: &Identity) -> f64;
}

/// No history at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistoryLookup for NoHistory {
    fn weight_for(&self, _identity: &Identity) -> f64 {
        0.0
    }
}

/// Usage of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    /// Number of launches.
    pub count: u32,

    /// First launch.
    pub first_used: DateTime<Utc>,

    /// Most recent launch.
    pub last_used: DateTime<Utc>,
}

impl UsageEntry {
    fn new(at: DateTime<Utc>) -> Self {
        Self {
            count: 1,
            first_used: at,
            last_used: at,
        }
    }

    fn record(&mut self, at: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.last_used = self.last_used.max(at);
    }

    fn weight(&self, now: DateTime<Utc>) -> f64 {
        let age_days = (now - self.last_used).num_seconds().max(0) as f64 / SECONDS_PER_DAY;
        let frequency = (f64::from(self.count) + 1.0).ln();
        let recency = (-LAMBDA * age_days).exp();
        0.4 * frequency * 10.0 + 0.6 * recency * 100.0
    }
}

/// In-memory frecency store.
///
/// Persisting it is the caller's business: [`FrecencyHistory::entries`] and
/// [`FrecencyHistory::restore`] move plain serialisable data in and out.
pub struct FrecencyHistory {
    entries: RwLock<HashMap<Identity, UsageEntry>>,
    clock: Arc<dyn Clock>,
}

impl FrecencyHistory {
    /// Create an empty store on the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store on `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Record one launch of `identity` now.
    pub fn record(&self, identity: &Identity) {
        let now = self.clock.now();
        self.entries
            .write()
            .entry(identity.clone())
            .and_modify(|e| e.record(now))
            .or_insert_with(|| UsageEntry::new(now));
        debug!("Recorded launch of {identity}");
    }

    /// Usage of `identity`, if any.
    pub fn usage(&self, identity: &Identity) -> Option<UsageEntry> {
        self.entries.read().get(identity).cloned()
    }

    /// All entries, sorted by identity.
    pub fn entries(&self) -> Vec<(Identity, UsageEntry)> {
        let mut entries: Vec<(Identity, UsageEntry)> = self
            .entries
            .read()
            .iter()
            .map(|(id, e)| (id.clone(), e.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Replace the store's contents.
    pub fn restore(&self, entries: impl IntoIterator<Item = (Identity, UsageEntry)>) {
        *self.entries.write() = entries.into_iter().collect();
    }

    /// Drop entries unused for longer than `max_age`. Returns how many went.
    pub fn prune_older_than(&self, max_age: TimeDelta) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| now - e.last_used <= max_age);
        before - entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for FrecencyHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLookup for FrecencyHistory {
    fn weight_for(&self, identity: &Identity) -> f64 {
        let now = self.clock.now();
        self.entries
            .read()
            .get(identity)
            .map_or(0.0, |e| e.weight(now))
    }
}

impl std::fmt::Debug for FrecencyHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrecencyHistory")
            .field("entries", &self.len())
            .finish()
    }
}
