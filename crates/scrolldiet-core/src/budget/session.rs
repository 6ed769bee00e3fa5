//! The live budget owned by the UI layer.
//!
//! `BudgetSession` holds the single in-memory `BudgetState` and runs every
//! transition through the pure functions in `state` / `engine`, then writes
//! the result through to the store before returning. Alerts become toasts
//! and system notifications here.
//!
//! ```text
//! open ──> (no state) ──setup──> active ──add_scrolls──> locked
//!                                  ^  │                    │
//!                                  └──┴── reset_today ─────┘
//! ```

use std::time::Instant;

use chrono::{NaiveDate, Utc};

use super::engine::{apply_increment, IncrementOutcome};
use super::state::{self, AppMode, BudgetState, Platform};
use super::store::{BudgetStore, Loaded};
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::notify::{Severity, SystemNotifier, ToastTray};
use crate::storage::Config;

pub struct BudgetSession<N> {
    store: BudgetStore,
    state: Option<BudgetState>,
    toasts: ToastTray,
    notifier: N,
    min_limit: u32,
}

impl<N: SystemNotifier> BudgetSession<N> {
    /// Load today's budget from `store`.
    ///
    /// A rollover found on load is persisted immediately.
    ///
    /// # Errors
    /// Returns an error if a rolled-over state cannot be saved.
    pub fn open(store: BudgetStore, config: &Config, notifier: N) -> Result<(Self, Vec<Event>)> {
        Self::open_on(store, config, notifier, state::today())
    }

    /// Same as [`open`](Self::open) with an explicit date.
    ///
    /// # Errors
    /// Returns an error if a rolled-over state cannot be saved.
    pub fn open_on(
        store: BudgetStore,
        config: &Config,
        notifier: N,
        today: NaiveDate,
    ) -> Result<(Self, Vec<Event>)> {
        let mut session = Self {
            store,
            state: None,
            toasts: ToastTray::new(config.notifications.toast_duration()),
            notifier,
            min_limit: config.budget.min_limit,
        };
        let events = session.reload_on(today)?.into_iter().collect();
        Ok((session, events))
    }

    /// Re-read the stored record, applying and persisting a rollover.
    ///
    /// Every transition starts here, so writes from another process sharing
    /// the database are never overwritten. Returns the rollover event, if any.
    ///
    /// # Errors
    /// Returns an error if a rolled-over state cannot be saved.
    pub fn reload(&mut self) -> Result<Option<Event>> {
        self.reload_on(state::today())
    }

    fn reload_on(&mut self, today: NaiveDate) -> Result<Option<Event>> {
        let loaded = self.store.load_checked(today);
        let mut rolled = None;
        if let Some(Loaded {
            state,
            rolled_over_from: Some(from),
        }) = &loaded
        {
            self.store.save(state)?;
            rolled = Some(Event::DayRolledOver {
                from: *from,
                to: state.last_reset_date,
                at: Utc::now(),
            });
        }
        self.state = loaded.map(|l| l.state);
        Ok(rolled)
    }

    pub fn state(&self) -> Option<&BudgetState> {
        self.state.as_ref()
    }

    /// The live state, or [`CoreError::NotInitialized`] before setup.
    ///
    /// # Errors
    /// Returns an error if setup has not run.
    pub fn require_state(&self) -> Result<&BudgetState> {
        self.state.as_ref().ok_or(CoreError::NotInitialized)
    }

    pub fn is_locked(&self) -> bool {
        self.state.as_ref().is_some_and(BudgetState::is_locked)
    }

    pub fn toasts(&self) -> &ToastTray {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastTray {
        &mut self.toasts
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// First-run setup. Replaces any existing state.
    ///
    /// # Errors
    /// Returns an error if the limit is zero or the state cannot be saved.
    pub fn setup(&mut self, limit: u32, mode: AppMode, platform: Platform) -> Result<Event> {
        self.setup_on(limit, mode, platform, state::today())
    }

    /// Setup with an explicit date.
    ///
    /// # Errors
    /// Returns an error if the limit is zero or the state cannot be saved.
    pub fn setup_on(
        &mut self,
        limit: u32,
        mode: AppMode,
        platform: Platform,
        today: NaiveDate,
    ) -> Result<Event> {
        let limit = limit.max(self.min_limit);
        let fresh = BudgetState::initialize(limit, mode, platform, today)?;
        self.commit(fresh)?;
        self.toasts.push(
            format!("Goal set: {limit} {}!", platform.unit_plural()),
            Severity::Success,
            Instant::now(),
        );
        tracing::info!(limit, ?mode, ?platform, "budget initialized");
        Ok(Event::BudgetInitialized {
            limit,
            mode,
            platform,
            at: Utc::now(),
        })
    }

    /// Add `amount` scroll units, persist, and surface any threshold alerts.
    ///
    /// # Errors
    /// Returns an error before setup or if the new state cannot be saved.
    pub fn add_scrolls(&mut self, amount: u32) -> Result<Vec<Event>> {
        let rolled = self.reload()?;
        let current = self.require_state()?.clone();
        let IncrementOutcome {
            state: next,
            applied,
            alerts,
        } = apply_increment(&current, amount);

        let now = Utc::now();
        let mut events: Vec<Event> = rolled.into_iter().collect();
        if applied == 0 {
            if amount > 0 {
                events.push(Event::IncrementSuppressed {
                    amount,
                    count: current.count,
                    limit: current.limit,
                    at: now,
                });
            }
            return Ok(events);
        }

        self.commit(next.clone())?;

        events.push(Event::ScrollsAdded {
            amount: applied,
            count: next.count,
            limit: next.limit,
            at: now,
        });
        let shown_at = Instant::now();
        for alert in alerts {
            self.toasts.push(alert.message.clone(), alert.severity, shown_at);
            let (title, body) = alert.threshold.system_alert();
            self.notifier.notify(title, body);
            events.push(Event::ThresholdCrossed {
                threshold: alert.threshold,
                percent: alert.threshold.percent(),
                severity: alert.severity,
                message: alert.message,
                count: next.count,
                limit: next.limit,
                at: now,
            });
        }
        Ok(events)
    }

    /// Replace the daily limit (floored at the configured minimum).
    ///
    /// # Errors
    /// Returns an error before setup or if the state cannot be saved.
    pub fn set_limit(&mut self, new_limit: u32) -> Result<Event> {
        self.reload()?;
        let current = self.require_state()?.clone();
        let new_limit = new_limit.max(self.min_limit);
        let next = current.with_limit(new_limit)?;
        self.commit(next)?;
        self.toasts
            .push("Daily limit updated!", Severity::Success, Instant::now());
        Ok(Event::LimitChanged {
            from: current.limit,
            to: new_limit,
            at: Utc::now(),
        })
    }

    /// Zero today's count.
    ///
    /// # Errors
    /// Returns an error before setup or if the state cannot be saved.
    pub fn reset_today(&mut self) -> Result<Event> {
        self.reload()?;
        let next = self.require_state()?.reset_today();
        self.commit(next)?;
        self.toasts
            .push("Progress reset.", Severity::Info, Instant::now());
        Ok(Event::ProgressReset { at: Utc::now() })
    }

    /// Forget the stored budget entirely so setup runs again.
    ///
    /// # Errors
    /// Returns an error if the record cannot be deleted.
    pub fn forget(&mut self) -> Result<()> {
        self.store.clear()?;
        self.state = None;
        Ok(())
    }

    fn commit(&mut self, next: BudgetState) -> Result<()> {
        self.store.save(&next)?;
        self.state = Some(next);
        Ok(())
    }
}
