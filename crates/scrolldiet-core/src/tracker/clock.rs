//! Wall-clock driven scroll estimator for tracker mode.
//!
//! Like the rest of the core, the clock has no internal thread: the caller
//! invokes `tick(now)` on a fixed interval and applies whatever units come
//! back. The last-processed timestamp only ever advances by whole units, so
//! fractional time carries over between ticks instead of being dropped.
//!
//! ## State Transitions
//!
//! ```text
//! Running <-> Paused        (user toggle)
//! Running  -> Suspended     (budget locked)
//! Paused | Suspended -> Running   (resume, clock restarts at now)
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerState {
    Running,
    Paused,
    /// Stopped because the budget is exhausted.
    Suspended,
}

impl TrackerState {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackerState::Running => "running",
            TrackerState::Paused => "paused",
            TrackerState::Suspended => "suspended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerClock {
    per_unit_ms: u64,
    state: TrackerState,
    /// Epoch milliseconds up to which time has been converted into units.
    /// `None` unless running.
    last_processed_ms: Option<u64>,
}

impl TrackerClock {
    /// A running clock starting at `now_ms`.
    ///
    /// A zero `per_unit` is bumped to one millisecond.
    pub fn start(per_unit: Duration, now_ms: u64) -> Self {
        Self {
            per_unit_ms: (per_unit.as_millis() as u64).max(1),
            state: TrackerState::Running,
            last_processed_ms: Some(now_ms),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TrackerState::Running
    }

    pub fn per_unit(&self) -> Duration {
        Duration::from_millis(self.per_unit_ms)
    }

    pub fn last_processed_ms(&self) -> Option<u64> {
        self.last_processed_ms
    }

    /// Time accumulated towards the next unit.
    pub fn carried(&self, now_ms: u64) -> Duration {
        self.last_processed_ms
            .map(|last| Duration::from_millis(now_ms.saturating_sub(last)))
            .unwrap_or_default()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Convert elapsed time into whole units.
    ///
    /// Returns 0 when paused, suspended, or when less than one unit has
    /// elapsed. Otherwise advances the clock by exactly `units * per_unit`.
    pub fn tick(&mut self, now_ms: u64) -> u32 {
        if self.state != TrackerState::Running {
            return 0;
        }
        let Some(last) = self.last_processed_ms else {
            self.last_processed_ms = Some(now_ms);
            return 0;
        };

        let elapsed = now_ms.saturating_sub(last);
        if elapsed < self.per_unit_ms {
            return 0;
        }
        let units = (elapsed / self.per_unit_ms).min(u64::from(u32::MAX));
        self.last_processed_ms = Some(last + units * self.per_unit_ms);
        units as u32
    }

    /// Stop counting. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.state != TrackerState::Running {
            return false;
        }
        self.state = TrackerState::Paused;
        self.last_processed_ms = None;
        true
    }

    /// Stop counting because the budget is locked.
    pub fn suspend(&mut self) {
        self.state = TrackerState::Suspended;
        self.last_processed_ms = None;
    }

    /// Start counting again from `now_ms`. Time spent paused or suspended is
    /// never counted. Returns false if already running.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.state == TrackerState::Running {
            return false;
        }
        self.state = TrackerState::Running;
        self.last_processed_ms = Some(now_ms);
        true
    }

    /// Flip between running and paused. Returns the new state.
    pub fn toggle(&mut self, now_ms: u64) -> TrackerState {
        if self.is_running() {
            self.pause();
        } else {
            self.resume(now_ms);
        }
        self.state
    }
}

pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
