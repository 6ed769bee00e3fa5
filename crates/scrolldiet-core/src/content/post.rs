use serde::{Deserialize, Serialize};
use url::Url;

const PICSUM_BASE: &str = "https://picsum.photos/";

/// One item in the simulated feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub username: String,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_track: Option<String>,
}

/// Placeholder image for a keyword, e.g. `https://picsum.photos/seed/cat/800/1200`.
///
/// Blank keywords fall back to `random`.
pub fn image_url(keyword: &str) -> String {
    let keyword = match keyword.trim() {
        "" => "random",
        k => k,
    };
    match Url::parse(PICSUM_BASE) {
        Ok(mut url) => {
            let _ = url.path_segments_mut().map(|mut segments| {
                segments.clear().extend(["seed", keyword, "800", "1200"]);
            });
            url.to_string()
        }
        Err(_) => format!("{PICSUM_BASE}seed/{keyword}/800/1200"),
    }
}
