use clap::{Args, ValueEnum};
use scrolldiet_core::{AppMode, Platform};

use super::{open_session, print_event, CliResult, ToastView};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModeArg {
    /// Count posts in the built-in feed
    Simulation,
    /// Estimate scrolls from time spent in the real app
    Tracker,
}

impl From<ModeArg> for AppMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Simulation => AppMode::Simulation,
            ModeArg::Tracker => AppMode::Tracker,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PlatformArg {
    Tiktok,
    Instagram,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Tiktok => Platform::Tiktok,
            PlatformArg::Instagram => Platform::Instagram,
        }
    }
}

#[derive(Args)]
pub struct SetupArgs {
    /// Daily limit (defaults to budget.default_limit)
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long, value_enum, default_value = "simulation")]
    mode: ModeArg,
    #[arg(long, value_enum, default_value = "tiktok")]
    platform: PlatformArg,
}

pub fn run(args: SetupArgs) -> CliResult {
    let (mut session, config) = open_session()?;
    let limit = args.limit.unwrap_or(config.budget.default_limit);
    let event = session.setup(limit, args.mode.into(), args.platform.into())?;
    print_event(&event)?;
    ToastView::default().show_new(&session);
    Ok(())
}
