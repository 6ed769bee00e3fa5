//! System alert collaborator.
//!
//! Alerts are fire-and-forget. When alerts are not permitted the caller gets
//! a [`NoopNotifier`]; a notifier that fails to deliver drops the alert. The
//! in-app toast is shown regardless.

use std::io::Write;
use std::sync::Mutex;

/// Delivers an out-of-band alert to the user.
pub trait SystemNotifier {
    fn notify(&self, title: &str, body: &str);

    /// False for notifiers that drop every alert.
    fn delivers(&self) -> bool {
        true
    }
}

impl<N: SystemNotifier + ?Sized> SystemNotifier for Box<N> {
    fn notify(&self, title: &str, body: &str) {
        (**self).notify(title, body)
    }

    fn delivers(&self) -> bool {
        (**self).delivers()
    }
}

/// Drops every alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl SystemNotifier for NoopNotifier {
    fn notify(&self, _title: &str, _body: &str) {}

    fn delivers(&self) -> bool {
        false
    }
}

/// Rings the terminal bell and prints the alert on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl SystemNotifier for TerminalNotifier {
    fn notify(&self, title: &str, body: &str) {
        let mut err = std::io::stderr().lock();
        if let Err(e) = writeln!(err, "\x07[{title}] {body}") {
            tracing::debug!(error = %e, "system alert not delivered");
        }
    }
}

/// The notifier for the `notifications.enabled` setting.
pub fn system_notifier(enabled: bool) -> Box<dyn SystemNotifier> {
    if enabled {
        Box::new(TerminalNotifier)
    } else {
        Box::new(NoopNotifier)
    }
}

/// Keeps every alert in memory. Used by tests and by callers that want to
/// inspect what would have been sent.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(title, body)` pairs in delivery order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

impl SystemNotifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((title.to_string(), body.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("a", "1");
        notifier.notify("b", "2");
        assert_eq!(
            notifier.sent(),
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn boxed_notifier_forwards() {
        let boxed: Box<RecordingNotifier> = Box::new(RecordingNotifier::new());
        boxed.notify("ScrollDiet Alert", "halfway");
        assert_eq!(boxed.sent().len(), 1);
    }

    #[test]
    fn disabled_alerts_use_noop() {
        let notifier = system_notifier(false);
        notifier.notify("ignored", "ignored");
        assert!(!notifier.delivers());
        assert!(system_notifier(true).delivers());
    }
}
