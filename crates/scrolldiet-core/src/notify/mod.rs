//! In-app toasts and system-level alerts.

mod system;
mod toast;

pub use system::{
    system_notifier, NoopNotifier, RecordingNotifier, SystemNotifier, TerminalNotifier,
};
pub use toast::{Severity, Toast, ToastTray};
