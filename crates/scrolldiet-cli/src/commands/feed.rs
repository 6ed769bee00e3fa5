//! Simulation mode: a text feed where each post seen for the first time adds
//! one scroll.

use tokio::io::{AsyncBufReadExt, BufReader};

use scrolldiet_core::{AppMode, Config, ContentClient, Event, FeedSession, Post};

use super::{
    lock_screen, next_expiry, open_session, print_event, print_events, runtime, CliResult,
    CliSession, ToastView,
};

const HELP: &str =
    "commands: <enter>/n = next, k = previous, s = status, x = dismiss toast, reset, q = quit";

/// `offline` skips the content service and uses the built-in posts.
pub fn run(offline: bool) -> CliResult {
    let (session, config) = open_session()?;
    if session.require_state()?.mode != AppMode::Simulation {
        eprintln!("note: budget was set up for tracker mode; using the feed anyway");
    }
    let client = if offline {
        ContentClient::new(&config.content, None)?
    } else {
        ContentClient::from_env(&config.content)?
    };
    runtime()?.block_on(feed_loop(session, config, client))
}

fn render(post: &Post, position: usize) {
    eprintln!();
    eprintln!("#{} @{}", position + 1, post.username);
    eprintln!("  {}", post.caption);
    eprintln!("  ♥ {}  💬 {}", post.likes, post.comments);
    if let Some(track) = &post.music_track {
        eprintln!("  ♪ {track}");
    }
    eprintln!("  {}", post.image_url);
}

struct Feed {
    session: CliSession,
    feed: FeedSession,
    toasts: ToastView,
    units: &'static str,
}

impl Feed {
    /// Show the current post and count it if it is new.
    fn view_current(&mut self) -> CliResult {
        let Some(post) = self.feed.current() else {
            eprintln!("(no posts)");
            return Ok(());
        };
        render(post, self.feed.cursor());
        if self.feed.observe_current() {
            print_events(&self.session.add_scrolls(1)?)?;
            self.toasts.show_new(&self.session);
            if self.session.is_locked() {
                lock_screen(self.units);
            }
        }
        Ok(())
    }

    async fn load_more_if_needed(&mut self, client: &ContentClient, batch: usize) {
        if self.feed.wants_more() {
            let added = self.feed.extend(client.fetch_posts(batch).await);
            tracing::debug!(added, total = self.feed.posts().len(), "feed extended");
        }
    }
}

async fn feed_loop(session: CliSession, config: Config, client: ContentClient) -> CliResult {
    let units = session.require_state()?.platform.unit_plural();
    let mut feed = Feed {
        session,
        feed: FeedSession::new(),
        toasts: ToastView::default(),
        units,
    };

    feed.feed
        .extend(client.fetch_posts(config.content.initial_batch).await);
    eprintln!("{HELP}");
    if feed.session.is_locked() {
        lock_screen(units);
    } else {
        feed.view_current()?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = next_expiry(feed.session.toasts().next_deadline()) => {
                feed.toasts.expire(&mut feed.session);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.trim() {
                    "" | "n" | "j" | "next" => {
                        if feed.session.is_locked() {
                            lock_screen(units);
                            continue;
                        }
                        feed.load_more_if_needed(&client, config.content.more_batch).await;
                        if feed.feed.next() {
                            feed.view_current()?;
                        } else {
                            eprintln!("(end of feed)");
                        }
                    }
                    "k" | "prev" | "previous" => {
                        if feed.session.is_locked() {
                            lock_screen(units);
                        } else if feed.feed.previous() {
                            feed.view_current()?;
                        }
                    }
                    "s" | "status" => {
                        print_event(&Event::snapshot(feed.session.require_state()?))?;
                    }
                    "x" | "dismiss" => {
                        feed.toasts.dismiss_oldest(&mut feed.session);
                    }
                    "reset" => {
                        print_event(&feed.session.reset_today()?)?;
                        feed.toasts.show_new(&feed.session);
                        feed.view_current()?;
                    }
                    "q" | "quit" => break,
                    other => eprintln!("unknown command `{other}`; {HELP}"),
                }
            }
            _ = &mut ctrl_c => break,
        }
    }

    print_event(&Event::snapshot(feed.session.require_state()?))?;
    Ok(())
}
