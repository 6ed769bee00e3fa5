//! Increment engine: apply scroll units and evaluate threshold crossings.
//!
//! The engine is pure. It takes the current state and an amount, and returns
//! the next state together with the alerts that crossing produced. The caller
//! persists the state and delivers the alerts.
//!
//! ## Thresholds
//!
//! ```text
//! 50 %  floor(limit * 0.5)  warning  "Halfway there"
//! 80 %  floor(limit * 0.8)  warning  "Slow down"
//! 100%  limit               danger   "limit reached"
//! ```
//!
//! A threshold `T` fires when `count < T <= count + amount`, so each one fires
//! at most once per day and several can fire on one call.

use serde::{Deserialize, Serialize};

use super::state::BudgetState;
use crate::notify::Severity;

/// One of the three fixed budget fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Half,
    Eighty,
    Limit,
}

impl Threshold {
    /// All thresholds in ascending order.
    pub const ALL: [Threshold; 3] = [Threshold::Half, Threshold::Eighty, Threshold::Limit];

    pub fn percent(self) -> u32 {
        match self {
            Threshold::Half => 50,
            Threshold::Eighty => 80,
            Threshold::Limit => 100,
        }
    }

    /// Scroll count at which this threshold is reached for `limit`.
    pub fn boundary(self, limit: u32) -> u32 {
        match self {
            Threshold::Limit => limit,
            other => (u64::from(limit) * u64::from(other.percent()) / 100) as u32,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Threshold::Half | Threshold::Eighty => Severity::Warning,
            Threshold::Limit => Severity::Danger,
        }
    }

    /// In-app message text.
    pub fn message(self) -> &'static str {
        match self {
            Threshold::Half => "Halfway there! 50% of your daily limit used.",
            Threshold::Eighty => "Slow down! Only 20% scrolls remaining.",
            Threshold::Limit => "That's it! You've reached your daily limit.",
        }
    }

    /// Title and body for the system-level alert.
    pub fn system_alert(self) -> (&'static str, &'static str) {
        match self {
            Threshold::Half => ("ScrollDiet Alert", self.message()),
            Threshold::Eighty => ("ScrollDiet Warning", self.message()),
            Threshold::Limit => ("ScrollDiet Limit Reached", "Stop scrolling now!"),
        }
    }
}

/// A threshold crossing produced by one increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub threshold: Threshold,
    pub severity: Severity,
    pub message: String,
    /// Scroll count the threshold sits at.
    pub boundary: u32,
}

impl BudgetAlert {
    fn for_threshold(threshold: Threshold, limit: u32) -> Self {
        Self {
            threshold,
            severity: threshold.severity(),
            message: threshold.message().to_string(),
            boundary: threshold.boundary(limit),
        }
    }
}

/// Result of [`apply_increment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementOutcome {
    pub state: BudgetState,
    /// Units actually added (0 when suppressed).
    pub applied: u32,
    /// Crossings in ascending threshold order.
    pub alerts: Vec<BudgetAlert>,
}

impl IncrementOutcome {
    fn unchanged(state: &BudgetState) -> Self {
        Self {
            state: state.clone(),
            applied: 0,
            alerts: Vec::new(),
        }
    }

    pub fn locked_now(&self) -> bool {
        self.alerts.iter().any(|a| a.threshold == Threshold::Limit)
    }
}

/// Thresholds crossed when moving from `before` to `after` under `limit`.
pub fn crossed_thresholds(before: u32, after: u32, limit: u32) -> Vec<Threshold> {
    Threshold::ALL
        .into_iter()
        .filter(|t| {
            let boundary = t.boundary(limit);
            before < boundary && boundary <= after
        })
        .collect()
}

/// Add `amount` scroll units to `state`.
///
/// A zero amount or an already locked state is a no-op. The increment that
/// crosses the limit is applied in full, so `count` may land above `limit`
/// once; every later call is suppressed.
pub fn apply_increment(state: &BudgetState, amount: u32) -> IncrementOutcome {
    if amount == 0 {
        tracing::warn!("ignoring zero-unit increment");
        return IncrementOutcome::unchanged(state);
    }
    if state.is_locked() {
        tracing::debug!(count = state.count, limit = state.limit, "budget locked, increment suppressed");
        return IncrementOutcome::unchanged(state);
    }

    let before = state.count;
    let after = before.saturating_add(amount);
    let alerts: Vec<BudgetAlert> = crossed_thresholds(before, after, state.limit)
        .into_iter()
        .map(|t| BudgetAlert::for_threshold(t, state.limit))
        .collect();

    for alert in &alerts {
        tracing::info!(
            threshold = alert.threshold.percent(),
            count = after,
            limit = state.limit,
            "budget threshold crossed"
        );
    }

    IncrementOutcome {
        state: BudgetState {
            count: after,
            ..state.clone()
        },
        applied: after - before,
        alerts,
    }
}
