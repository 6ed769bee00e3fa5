use clap::Subcommand;
use scrolldiet_core::content::{clear_api_key, resolve_api_key, store_api_key};

use super::CliResult;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the content API key in the OS keyring
    Login {
        /// API key for the content service
        #[arg(long)]
        key: String,
    },
    /// Remove the stored API key
    Logout,
    /// Show where the API key comes from
    Status,
}

pub fn run(action: AuthAction) -> CliResult {
    match action {
        AuthAction::Login { key } => {
            store_api_key(&key)?;
            println!("API key stored");
        }
        AuthAction::Logout => {
            clear_api_key()?;
            println!("API key removed");
        }
        AuthAction::Status => match resolve_api_key() {
            Some((_, source)) => println!("configured via {}", source.describe()),
            None => println!("not configured (built-in posts will be used)"),
        },
    }
    Ok(())
}
