use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "scrolldiet", version, about = "Daily scroll budget for TikTok and Reels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a daily limit, mode and platform
    Setup(commands::setup::SetupArgs),
    /// Print today's budget
    Status {
        /// Human-readable summary instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Count scrolls by hand
    Add {
        /// Number of scrolls to add
        #[arg(default_value = "1")]
        amount: u32,
    },
    /// Browse the simulated feed; each new post counts as one scroll
    Feed {
        /// Use the built-in posts without calling the content service
        #[arg(long)]
        offline: bool,
    },
    /// Estimate scrolls from time spent in the real app
    Track {
        /// Open the platform app/site before tracking starts
        #[arg(long)]
        open: bool,
    },
    /// Change the daily limit
    Limit {
        #[command(subcommand)]
        action: commands::budget::LimitAction,
    },
    /// Zero today's count
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Delete the stored budget so setup runs again
    Forget {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print a batch of feed posts as JSON
    Posts(commands::posts::PostsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Content service API key
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("SCROLLDIET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Setup(args) => commands::setup::run(args),
        Commands::Status { text } => commands::budget::status(text),
        Commands::Add { amount } => commands::budget::add(amount),
        Commands::Feed { offline } => commands::feed::run(offline),
        Commands::Track { open } => commands::track::run(open),
        Commands::Limit { action } => commands::budget::limit(action),
        Commands::Reset { yes } => commands::budget::reset(yes),
        Commands::Forget { yes } => commands::budget::forget(yes),
        Commands::Posts(args) => commands::posts::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Auth { action } => commands::auth::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
