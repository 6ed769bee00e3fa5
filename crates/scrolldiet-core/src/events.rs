use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::budget::{AppMode, BudgetLevel, BudgetState, Platform, Threshold};
use crate::notify::Severity;

/// Every budget state change produces an Event.
/// The CLI prints them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    BudgetInitialized {
        limit: u32,
        mode: AppMode,
        platform: Platform,
        at: DateTime<Utc>,
    },
    DayRolledOver {
        from: NaiveDate,
        to: NaiveDate,
        at: DateTime<Utc>,
    },
    ScrollsAdded {
        amount: u32,
        count: u32,
        limit: u32,
        at: DateTime<Utc>,
    },
    /// Increment suppressed because the budget is already exhausted.
    IncrementSuppressed {
        amount: u32,
        count: u32,
        limit: u32,
        at: DateTime<Utc>,
    },
    ThresholdCrossed {
        threshold: Threshold,
        percent: u32,
        severity: Severity,
        message: String,
        count: u32,
        limit: u32,
        at: DateTime<Utc>,
    },
    LimitChanged {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
    ProgressReset {
        at: DateTime<Utc>,
    },
    TrackerPaused {
        at: DateTime<Utc>,
    },
    TrackerResumed {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        count: u32,
        limit: u32,
        remaining: u32,
        percent_used: f64,
        level: BudgetLevel,
        locked: bool,
        mode: AppMode,
        platform: Platform,
        last_reset_date: NaiveDate,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Full snapshot of a budget state.
    pub fn snapshot(state: &BudgetState) -> Self {
        Event::StateSnapshot {
            count: state.count,
            limit: state.limit,
            remaining: state.remaining(),
            percent_used: state.percent_used(),
            level: state.level(),
            locked: state.is_locked(),
            mode: state.mode,
            platform: state.platform,
            last_reset_date: state.last_reset_date,
            at: Utc::now(),
        }
    }
}
