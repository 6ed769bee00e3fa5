//! The persisted daily budget record and its pure transitions.
//!
//! `BudgetState` is serialized with the same field names the browser build
//! wrote to local storage (`count`, `limit`, `lastResetDate`, `mode`,
//! `platform`), so an exported record can be dropped straight into the kv
//! store.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Smallest limit the manual controls will accept.
pub const MIN_DAILY_LIMIT: u32 = 5;

/// Limit offered during setup when the user does not pick one.
pub const DEFAULT_DAILY_LIMIT: u32 = 50;

/// Selects where increments come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppMode {
    /// Counted per distinct post in the simulated feed.
    #[default]
    Simulation,
    /// Counted from wall-clock time at a fixed seconds-per-scroll rate.
    Tracker,
}

/// Which short-video app the budget is framed around. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    #[default]
    Tiktok,
    Instagram,
}

impl Platform {
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Tiktok => "TikTok",
            Platform::Instagram => "Instagram",
        }
    }

    /// Plural noun for one budget unit ("TikToks", "Reels").
    pub fn unit_plural(self) -> &'static str {
        match self {
            Platform::Tiktok => "TikToks",
            Platform::Instagram => "Reels",
        }
    }

    pub fn app_url(self) -> &'static str {
        match self {
            Platform::Tiktok => "https://www.tiktok.com",
            Platform::Instagram => "https://www.instagram.com/reels",
        }
    }
}

/// Coarse band of budget usage, matching the alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetLevel {
    /// Below 50 %.
    Fresh,
    /// 50 % up to 80 %.
    Halfway,
    /// 80 % up to the limit.
    Critical,
    /// At or past the limit.
    Exhausted,
}

/// The day's budget. Exactly one of these is live at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    /// Units consumed since `last_reset_date`.
    pub count: u32,
    /// Daily allowance. Always > 0.
    pub limit: u32,
    /// The date `count` was last zeroed.
    pub last_reset_date: NaiveDate,
    #[serde(default)]
    pub mode: AppMode,
    #[serde(default)]
    pub platform: Platform,
}

/// Today's date as used by the rollover rule (UTC calendar date).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl BudgetState {
    /// Fresh state for `today` with nothing consumed.
    pub fn initialize(
        limit: u32,
        mode: AppMode,
        platform: Platform,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::ZeroLimit);
        }
        Ok(Self {
            count: 0,
            limit,
            last_reset_date: today,
            mode,
            platform,
        })
    }

    /// Apply the day-rollover rule.
    ///
    /// Returns the state unchanged when `last_reset_date == today`, otherwise
    /// a copy with `count = 0` stamped with `today`.
    pub fn rolled_over(&self, today: NaiveDate) -> Self {
        if self.last_reset_date == today {
            return self.clone();
        }
        Self {
            count: 0,
            last_reset_date: today,
            ..self.clone()
        }
    }

    /// Replace the limit, leaving the count alone.
    pub fn with_limit(&self, new_limit: u32) -> Result<Self, ValidationError> {
        if new_limit == 0 {
            return Err(ValidationError::ZeroLimit);
        }
        Ok(Self {
            limit: new_limit,
            ..self.clone()
        })
    }

    /// Explicit same-day reset: zero the count, keep the date.
    pub fn reset_today(&self) -> Self {
        Self {
            count: 0,
            ..self.clone()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.count >= self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.count)
    }

    /// 0.0 .. 100.0, clamped.
    pub fn percent_used(&self) -> f64 {
        if self.limit == 0 {
            return 100.0;
        }
        (self.count as f64 / self.limit as f64 * 100.0).min(100.0)
    }

    /// Estimated screen time left, in minutes.
    pub fn remaining_screen_minutes(&self, seconds_per_scroll: u64) -> f64 {
        self.remaining() as f64 * seconds_per_scroll as f64 / 60.0
    }

    pub fn level(&self) -> BudgetLevel {
        let pct = self.percent_used();
        if pct >= 100.0 {
            BudgetLevel::Exhausted
        } else if pct >= 80.0 {
            BudgetLevel::Critical
        } else if pct >= 50.0 {
            BudgetLevel::Halfway
        } else {
            BudgetLevel::Fresh
        }
    }
}
