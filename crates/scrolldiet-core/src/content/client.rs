//! Generated feed content from the Gemini `generateContent` API.
//!
//! The simulated feed must never stall on the network, so
//! [`ContentClient::fetch_posts`] always returns posts: any failure is logged
//! and answered from the built-in set.

use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::credentials::resolve_api_key;
use super::fallback::fallback_posts;
use super::post::{image_url, Post};
use crate::error::ContentError;
use crate::storage::ContentConfig;

pub struct ContentClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

/// One item as the model returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedPost {
    username: String,
    caption: String,
    likes: u64,
    comments: u64,
    #[serde(default)]
    music_track: Option<String>,
    #[serde(default)]
    image_keyword: Option<String>,
}

impl ContentClient {
    /// Client with an explicit key (or none).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ContentConfig, api_key: Option<String>) -> Result<Self, ContentError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Client using the key from the environment or keyring.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env(config: &ContentConfig) -> Result<Self, ContentError> {
        let api_key = resolve_api_key().map(|(key, source)| {
            tracing::debug!(source = %source.describe(), "content API key found");
            key
        });
        Self::new(config, api_key)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// `count` posts, generated when possible, built-in otherwise.
    pub async fn fetch_posts(&self, count: usize) -> Vec<Post> {
        if count == 0 {
            return Vec::new();
        }
        match self.generate(count).await {
            Ok(posts) if !posts.is_empty() => posts,
            Ok(_) => {
                tracing::warn!("content service returned no posts, using fallback");
                fallback_posts(count)
            }
            Err(ContentError::MissingCredentials) => {
                tracing::warn!("no content API key found, using fallback posts");
                fallback_posts(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "content generation failed, using fallback");
                fallback_posts(count)
            }
        }
    }

    /// Ask the model for `count` posts.
    ///
    /// # Errors
    /// Returns an error when no key is configured, the request fails, or the
    /// response does not hold the expected JSON array.
    pub async fn generate(&self, count: usize) -> Result<Vec<Post>, ContentError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ContentError::MissingCredentials)?;

        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.endpoint, self.model
        ))?;
        url.query_pairs_mut().append_pair("key", key);

        let resp = self
            .http
            .post(url)
            .json(&request_body(count))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ContentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp.json().await?;
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| ContentError::Malformed("missing candidate text".into()))?;

        let generated: Vec<GeneratedPost> = serde_json::from_str(text)
            .map_err(|e| ContentError::Malformed(e.to_string()))?;

        let stamp = Utc::now().timestamp_millis();
        let posts: Vec<Post> = generated
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(index, item)| Post {
                id: format!("gen-{stamp}-{index}"),
                username: item.username,
                caption: item.caption,
                likes: item.likes,
                comments: item.comments,
                image_url: image_url(item.image_keyword.as_deref().unwrap_or_default()),
                music_track: item.music_track,
            })
            .collect();

        tracing::info!(count = posts.len(), "generated feed posts");
        Ok(posts)
    }
}

fn request_body(count: usize) -> Value {
    let prompt = format!(
        "Generate {count} engaging, viral-style social media posts similar to TikTok or \
         Instagram Reels. Include a username, a catchy caption with hashtags, a realistic \
         like count (between 1000 and 1000000), a comment count, and a fictional music \
         track name."
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "username": { "type": "STRING" },
                        "caption": { "type": "STRING" },
                        "likes": { "type": "INTEGER" },
                        "comments": { "type": "INTEGER" },
                        "musicTrack": { "type": "STRING" },
                        "imageKeyword": {
                            "type": "STRING",
                            "description": "A single keyword to search for an image, e.g., 'cat', 'sunset', 'car'"
                        }
                    },
                    "required": ["username", "caption", "likes", "comments", "musicTrack", "imageKeyword"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn config(endpoint: &str) -> ContentConfig {
        ContentConfig {
            endpoint: endpoint.to_string(),
            ..ContentConfig::default()
        }
    }

    fn candidate(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    fn path() -> Matcher {
        Matcher::Regex(r"^/models/gemini-2\.5-flash:generateContent".into())
    }

    #[tokio::test]
    async fn generated_posts_are_mapped() {
        let mut server = mockito::Server::new_async().await;
        let items = json!([
            {
                "username": "sunset_chaser",
                "caption": "Golden hour #sky",
                "likes": 5000,
                "comments": 40,
                "musicTrack": "Dusk - Synth",
                "imageKeyword": "sunset"
            },
            {
                "username": "car_guy",
                "caption": "Vroom #cars",
                "likes": 1200,
                "comments": 3,
                "musicTrack": "Engine Beat",
                "imageKeyword": ""
            }
        ]);
        let mock = server
            .mock("POST", path())
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate(&items.to_string()))
            .create_async()
            .await;

        let client = ContentClient::new(&config(&server.url()), Some("test-key".into())).unwrap();
        let posts = client.fetch_posts(2).await;
        mock.assert_async().await;

        assert_eq!(posts.len(), 2);
        assert!(posts[0].id.starts_with("gen-"));
        assert!(posts[0].id.ends_with("-0"));
        assert!(posts[1].id.ends_with("-1"));
        assert_eq!(posts[0].image_url, "https://picsum.photos/seed/sunset/800/1200");
        assert_eq!(posts[1].image_url, "https://picsum.photos/seed/random/800/1200");
        assert_eq!(posts[0].music_track.as_deref(), Some("Dusk - Synth"));
    }

    #[tokio::test]
    async fn server_error_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", path())
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ContentClient::new(&config(&server.url()), Some("k".into())).unwrap();
        assert!(matches!(
            client.generate(3).await,
            Err(ContentError::Status { status: 500, .. })
        ));
        let posts = client.fetch_posts(3).await;
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.id.starts_with("fallback-")));
    }

    #[tokio::test]
    async fn unparseable_payload_falls_back() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", path())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(candidate("not json"))
            .create_async()
            .await;

        let client = ContentClient::new(&config(&server.url()), Some("k".into())).unwrap();
        assert!(matches!(
            client.generate(5).await,
            Err(ContentError::Malformed(_))
        ));
        assert_eq!(client.fetch_posts(5).await.len(), 5);
    }

    #[tokio::test]
    async fn missing_key_skips_network() {
        let client = ContentClient::new(&config("http://127.0.0.1:9"), None).unwrap();
        assert!(!client.has_api_key());
        assert!(matches!(
            client.generate(5).await,
            Err(ContentError::MissingCredentials)
        ));
        assert_eq!(client.fetch_posts(5).await.len(), 5);
    }

    #[test]
    fn request_asks_for_json_array() {
        let body = request_body(3);
        assert_eq!(
            body.pointer("/generationConfig/responseMimeType"),
            Some(&json!("application/json"))
        );
        assert!(body
            .pointer("/contents/0/parts/0/text")
            .and_then(Value::as_str)
            .unwrap()
            .starts_with("Generate 3 "));
    }
}
