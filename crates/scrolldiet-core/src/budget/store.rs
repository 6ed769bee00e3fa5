//! Write-through persistence of the single `BudgetState` record.
//!
//! The record lives in the kv table under [`STATE_KEY`] as JSON. Reading
//! applies the day-rollover rule; a record that cannot be read or parsed is
//! reported as absent so the setup flow runs again.

use chrono::NaiveDate;

use super::state::{self, BudgetState};
use crate::error::Result;
use crate::storage::Database;

/// Fixed kv key for the budget record.
pub const STATE_KEY: &str = "scroll_diet_data";

pub struct BudgetStore {
    db: Database,
}

/// A record read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// The state after the rollover rule.
    pub state: BudgetState,
    /// The stored date, when it differed from today.
    pub rolled_over_from: Option<NaiveDate>,
}

impl BudgetStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open the store in the default data directory.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Database::open()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Load the record for the current UTC date.
    pub fn load(&self) -> Option<BudgetState> {
        self.load_on(state::today())
    }

    /// Load the record, rolling it over if it was last reset before `today`.
    ///
    /// Never fails: an unreadable or malformed record is logged and treated
    /// as missing.
    pub fn load_on(&self, today: NaiveDate) -> Option<BudgetState> {
        self.load_checked(today).map(|loaded| loaded.state)
    }

    /// Like [`load_on`](Self::load_on), also reporting the stale date when a
    /// rollover happened.
    pub fn load_checked(&self, today: NaiveDate) -> Option<Loaded> {
        let raw = match self.db.kv_get(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read budget record");
                return None;
            }
        };

        let stored: BudgetState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse budget record, running setup again");
                return None;
            }
        };

        if stored.limit == 0 {
            tracing::warn!("stored budget has a zero limit, running setup again");
            return None;
        }

        let state = stored.rolled_over(today);
        let rolled_over_from = (state.last_reset_date != stored.last_reset_date).then(|| {
            tracing::info!(
                from = %stored.last_reset_date,
                to = %state.last_reset_date,
                "new day, scroll count reset"
            );
            stored.last_reset_date
        });
        Some(Loaded {
            state,
            rolled_over_from,
        })
    }

    /// Overwrite the stored record.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, state: &BudgetState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.db.kv_set(STATE_KEY, &json)?;
        Ok(())
    }

    /// Forget the stored record.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn clear(&self) -> Result<()> {
        self.db.kv_delete(STATE_KEY)?;
        Ok(())
    }
}
