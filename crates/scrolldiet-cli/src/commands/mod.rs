pub mod auth;
pub mod budget;
pub mod config;
pub mod feed;
pub mod posts;
pub mod setup;
pub mod track;

use std::collections::HashSet;
use std::error::Error;

use scrolldiet_core::budget::BudgetStore;
use scrolldiet_core::{system_notifier, BudgetSession, Config, Event, SystemNotifier};

pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

pub type CliSession = BudgetSession<Box<dyn SystemNotifier>>;

/// Load config and today's budget, printing any rollover event.
pub fn open_session() -> CliResult<(CliSession, Config)> {
    let config = Config::load()?;
    let store = BudgetStore::open()?;
    let notifier = system_notifier(config.notifications.enabled);
    let (session, events) = BudgetSession::open(store, &config, notifier)?;
    print_events(&events)?;
    Ok((session, config))
}

pub fn print_event(event: &Event) -> CliResult {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        print_event(event)?;
    }
    Ok(())
}

/// Tracks which toasts have been rendered so each one is printed once.
#[derive(Default)]
pub struct ToastView {
    shown: HashSet<String>,
}

impl ToastView {
    /// Print toasts that appeared since the last call.
    pub fn show_new<N: SystemNotifier>(&mut self, session: &BudgetSession<N>) {
        for toast in session.toasts().active() {
            if self.shown.insert(toast.id.clone()) {
                eprintln!("[{}] {}", toast.severity.label(), toast.text);
            }
        }
    }

    /// Drop expired toasts from the session and from the shown set.
    pub fn expire<N: SystemNotifier>(&mut self, session: &mut BudgetSession<N>) {
        for toast in session.toasts_mut().expire(std::time::Instant::now()) {
            self.shown.remove(&toast.id);
        }
    }

    /// Dismiss the oldest visible toast.
    pub fn dismiss_oldest<N: SystemNotifier>(&mut self, session: &mut BudgetSession<N>) -> bool {
        let Some(id) = session.toasts().active().next().map(|t| t.id.clone()) else {
            return false;
        };
        self.shown.remove(&id);
        session.toasts_mut().dismiss(&id)
    }
}

/// Sleep until the earliest toast deadline, or forever when there is none.
pub async fn next_expiry(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

pub fn lock_screen(platform_units: &str) {
    eprintln!();
    eprintln!("  That's it! You've reached your daily limit of {platform_units}.");
    eprintln!("  Stop scrolling now! Type `reset` to start over or `q` to quit.");
    eprintln!();
}

pub fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
