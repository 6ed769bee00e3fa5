//! Feed content for simulation mode.

mod client;
pub mod credentials;
mod fallback;
mod post;

pub use client::ContentClient;
pub use credentials::{clear_api_key, resolve_api_key, store_api_key, KeySource};
pub use fallback::{fallback_posts, FALLBACK_LEN};
pub use post::{image_url, Post};
