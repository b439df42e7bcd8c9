//! The penalty gate that collapses change storms.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::clock::Clock;

/// Admits at most one trigger per penalty period.
///
/// The deadline check and its advance happen under one lock, so two
/// near-simultaneous triggers cannot both pass.
pub struct PenaltyGate {
    period: TimeDelta,
    clock: Arc<dyn Clock>,
    end_of_penalty: Mutex<DateTime<Utc>>,
}

impl PenaltyGate {
    /// Create an open gate.
    pub fn new(period: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Self {
            period,
            clock,
            end_of_penalty: Mutex::new(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Pass the gate if the penalty has expired, starting a new penalty.
    pub fn try_pass(&self) -> bool {
        let now = self.clock.now();
        let mut deadline = self.end_of_penalty.lock();
        if now <= *deadline {
            debug!("Change suppressed until {}", *deadline);
            return false;
        }

        *deadline = now
            .checked_add_signed(self.period)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        true
    }

    /// When the current penalty ends.
    pub fn end_of_penalty(&self) -> DateTime<Utc> {
        *self.end_of_penalty.lock()
    }

    /// The penalty period.
    pub fn period(&self) -> TimeDelta {
        self.period
    }
}

impl std::fmt::Debug for PenaltyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PenaltyGate")
            .field("period", &self.period)
            .field("end_of_penalty", &self.end_of_penalty())
            .finish()
    }
}
