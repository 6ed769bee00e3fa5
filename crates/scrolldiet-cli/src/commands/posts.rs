use clap::Args;
use scrolldiet_core::content::fallback_posts;
use scrolldiet_core::{Config, ContentClient};

use super::{runtime, CliResult};

#[derive(Args)]
pub struct PostsArgs {
    /// Number of posts (defaults to content.initial_batch)
    #[arg(long)]
    count: Option<usize>,
    /// Use the built-in posts without calling the content service
    #[arg(long)]
    offline: bool,
}

pub fn run(args: PostsArgs) -> CliResult {
    let config = Config::load()?;
    let count = args.count.unwrap_or(config.content.initial_batch);

    let posts = if args.offline {
        fallback_posts(count)
    } else {
        let client = ContentClient::from_env(&config.content)?;
        runtime()?.block_on(client.fetch_posts(count))
    };

    println!("{}", serde_json::to_string_pretty(&posts)?);
    Ok(())
}
