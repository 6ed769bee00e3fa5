use clap::Subcommand;
use scrolldiet_core::{AppMode, BudgetLevel, Event};

use super::{open_session, print_event, print_events, CliResult, ToastView};

#[derive(Subcommand)]
pub enum LimitAction {
    /// Set an exact limit
    Set {
        /// New daily limit (floored at budget.min_limit)
        value: u32,
    },
    /// Raise the limit by budget.limit_step
    Up,
    /// Lower the limit by budget.limit_step
    Down,
}

pub fn status(text: bool) -> CliResult {
    let (session, config) = open_session()?;
    let state = session.require_state()?;

    if !text {
        return print_event(&Event::snapshot(state));
    }

    let label = match state.level() {
        BudgetLevel::Fresh => "on track",
        BudgetLevel::Halfway => "halfway",
        BudgetLevel::Critical => "almost out",
        BudgetLevel::Exhausted => "limit reached",
    };
    println!(
        "{} {} / {} {} ({:.0}%, {label})",
        state.platform.display_name(),
        state.count,
        state.limit,
        state.platform.unit_plural(),
        state.percent_used(),
    );
    println!("{} left today", state.remaining());
    if state.mode == AppMode::Tracker {
        println!(
            "about {:.1} min of scrolling left",
            state.remaining_screen_minutes(config.tracker.seconds_per_scroll)
        );
    }
    Ok(())
}

pub fn add(amount: u32) -> CliResult {
    let (mut session, _) = open_session()?;
    let events = session.add_scrolls(amount)?;
    print_events(&events)?;
    ToastView::default().show_new(&session);
    if session.is_locked() {
        eprintln!("Daily limit reached. Stop scrolling now!");
    }
    Ok(())
}

pub fn limit(action: LimitAction) -> CliResult {
    let (mut session, config) = open_session()?;
    let current = session.require_state()?.limit;
    let step = config.budget.limit_step;
    let target = match action {
        LimitAction::Set { value } => value,
        LimitAction::Up => current.saturating_add(step),
        LimitAction::Down => current.saturating_sub(step),
    };
    let event = session.set_limit(config.clamp_limit(target))?;
    print_event(&event)?;
    ToastView::default().show_new(&session);
    Ok(())
}

pub fn reset(yes: bool) -> CliResult {
    if !yes {
        return Err("refusing to reset today's progress without --yes".into());
    }
    let (mut session, _) = open_session()?;
    let event = session.reset_today()?;
    print_event(&event)?;
    ToastView::default().show_new(&session);
    Ok(())
}

pub fn forget(yes: bool) -> CliResult {
    if !yes {
        return Err("refusing to delete the stored budget without --yes".into());
    }
    let (mut session, _) = open_session()?;
    session.forget()?;
    println!("budget cleared; run `scrolldiet setup` to start again");
    Ok(())
}
