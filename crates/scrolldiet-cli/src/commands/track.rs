//! Tracker mode: while running, every `tracker.seconds_per_scroll` of wall
//! time adds one scroll. Reads single-word commands from stdin.

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, Interval, MissedTickBehavior};

use scrolldiet_core::tracker::now_ms;
use scrolldiet_core::{AppMode, Config, Event, TrackerClock, TrackerState};

use super::{
    lock_screen, next_expiry, open_session, print_event, print_events, runtime, CliResult,
    CliSession, ToastView,
};

const HELP: &str = "commands: p = pause/resume, s = status, x = dismiss toast, reset, q = quit";

pub fn run(open_app: bool) -> CliResult {
    let (session, config) = open_session()?;
    let state = session.require_state()?;
    if state.mode != AppMode::Tracker {
        eprintln!("note: budget was set up for simulation mode; tracking anyway");
    }
    if open_app {
        let url = state.platform.app_url();
        if let Err(e) = open::that(url) {
            tracing::warn!(error = %e, url, "could not open platform app");
        }
    }
    runtime()?.block_on(track_loop(session, config))
}

fn new_ticker(config: &Config) -> Interval {
    let mut ticker = interval(config.tracker.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Resolves on the next tick, or never when the ticker is dropped.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn track_loop(mut session: CliSession, config: Config) -> CliResult {
    let mut clock = TrackerClock::start(config.tracker.per_unit(), now_ms());
    let mut ticker = Some(new_ticker(&config));
    let mut toasts = ToastView::default();
    let units = session.require_state()?.platform.unit_plural();

    if session.is_locked() {
        clock.suspend();
        ticker = None;
        lock_screen(units);
    }
    eprintln!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                let added = clock.tick(now_ms());
                if added == 0 {
                    continue;
                }
                print_events(&session.add_scrolls(added)?)?;
                toasts.show_new(&session);
                if session.is_locked() {
                    clock.suspend();
                    ticker = None;
                    lock_screen(units);
                }
            }
            _ = next_expiry(session.toasts().next_deadline()) => {
                toasts.expire(&mut session);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "p" | "pause" | "resume" => {
                        if session.is_locked() {
                            eprintln!("limit reached; `reset` to start over");
                            continue;
                        }
                        let event = if clock.is_running() {
                            clock.pause();
                            ticker = None;
                            Event::TrackerPaused { at: Utc::now() }
                        } else {
                            clock.resume(now_ms());
                            ticker = Some(new_ticker(&config));
                            Event::TrackerResumed { at: Utc::now() }
                        };
                        print_event(&event)?;
                    }
                    "s" | "status" => {
                        print_event(&Event::snapshot(session.require_state()?))?;
                        eprintln!("tracker {}", clock.state().as_str());
                    }
                    "x" | "dismiss" => {
                        toasts.dismiss_oldest(&mut session);
                    }
                    "reset" => {
                        print_event(&session.reset_today()?)?;
                        toasts.show_new(&session);
                        // A user pause outlives the reset; only the lock lifts.
                        if clock.state() == TrackerState::Suspended {
                            clock.resume(now_ms());
                            ticker = Some(new_ticker(&config));
                        }
                    }
                    "q" | "quit" => break,
                    "" => {}
                    other => eprintln!("unknown command `{other}`; {HELP}"),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    // Flush whole units accrued since the last tick.
    let added = clock.tick(now_ms());
    if added > 0 {
        print_events(&session.add_scrolls(added)?)?;
    }
    print_event(&Event::snapshot(session.require_state()?))?;
    Ok(())
}
