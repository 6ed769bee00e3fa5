//! # ScrollDiet Core Library
//!
//! Core logic for ScrollDiet, a daily budget for short-form video scrolling.
//! Everything the `scrolldiet` CLI does goes through this crate.
//!
//! ## Architecture
//!
//! - **Budget**: the persisted daily record, the pure increment engine that
//!   decides when the 50% / 80% / 100% thresholds fire, and the
//!   [`BudgetSession`] that writes every transition through to storage
//! - **Tracker**: a wall-clock estimator that converts time spent in the real
//!   app into scroll units; the caller drives it with `tick()`
//! - **Feed**: simulation-mode view counting over generated or built-in posts
//! - **Notify**: toasts with per-message expiry and system-level alerts
//! - **Storage**: SQLite key/value persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`BudgetSession`]: live budget with write-through persistence
//! - [`TrackerClock`]: elapsed time to scroll units
//! - [`ContentClient`]: feed posts with offline fallback
//! - [`Config`]: application configuration management

pub mod budget;
pub mod content;
pub mod error;
pub mod events;
pub mod feed;
pub mod notify;
pub mod storage;
pub mod tracker;

pub use budget::{
    apply_increment, AppMode, BudgetLevel, BudgetSession, BudgetState, BudgetStore,
    IncrementOutcome, Platform, Threshold,
};
pub use content::{ContentClient, Post};
pub use error::{ConfigError, ContentError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use feed::FeedSession;
pub use notify::{system_notifier, Severity, SystemNotifier, Toast, ToastTray};
pub use storage::{Config, Database};
pub use tracker::{TrackerClock, TrackerState};
