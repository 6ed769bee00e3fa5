//! Ephemeral in-app messages with scoped expiry.
//!
//! Every toast owns one deadline from the moment it is pushed. The deadline
//! is released either by [`ToastTray::expire`] once it passes or by
//! [`ToastTray::dismiss`]; in both cases the entry leaves the tray, so a
//! toast is never removed twice.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Visual weight of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
    Success,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Danger => "DANGER",
            Severity::Success => "SUCCESS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: String,
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug)]
struct ActiveToast {
    toast: Toast,
    expires_at: Instant,
}

/// The set of toasts currently on screen.
#[derive(Debug)]
pub struct ToastTray {
    display_for: Duration,
    active: Vec<ActiveToast>,
}

impl ToastTray {
    pub fn new(display_for: Duration) -> Self {
        Self {
            display_for,
            active: Vec::new(),
        }
    }

    /// Show a message until `now + display_for`. Returns the new toast.
    pub fn push(&mut self, text: impl Into<String>, severity: Severity, now: Instant) -> Toast {
        let toast = Toast {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            severity,
        };
        self.active.push(ActiveToast {
            toast: toast.clone(),
            expires_at: now + self.display_for,
        });
        toast
    }

    /// Remove a toast before its deadline. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.toast.id != id);
        self.active.len() != before
    }

    /// Drop every toast whose deadline has passed, returning them in display order.
    pub fn expire(&mut self, now: Instant) -> Vec<Toast> {
        let (expired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.active)
            .into_iter()
            .partition(|t| t.expires_at <= now);
        self.active = kept;
        expired.into_iter().map(|t| t.toast).collect()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.iter().map(|t| t.expires_at).min()
    }

    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|t| &t.toast)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
