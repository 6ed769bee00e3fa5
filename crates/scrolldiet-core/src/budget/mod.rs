//! Daily scroll budget: state, persistence, increment engine and the
//! session that ties them together.

mod engine;
mod session;
mod state;
mod store;

pub use engine::{apply_increment, crossed_thresholds, BudgetAlert, IncrementOutcome, Threshold};
pub use session::BudgetSession;
pub use state::{
    today, AppMode, BudgetLevel, BudgetState, Platform, DEFAULT_DAILY_LIMIT,
    MIN_DAILY_LIMIT,
};
pub use store::{BudgetStore, Loaded, STATE_KEY};
