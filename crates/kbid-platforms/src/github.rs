// crates/kbid-platforms/src/github.rs
//
// GitHub code-host client. Unauthenticated `GET /users/{username}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use kbid_core::{CodeHostClient, CodeHostProfile, FetchError};

use crate::http::{build_client, fetch_body, normalize_base_url};

/// Base URL of the public GitHub REST API.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Client for the GitHub users API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl GithubClient {
    pub fn new() -> Self {
        Self::with_base_url(GITHUB_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: build_client(),
        }
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeHostClient for GithubClient {
    async fn lookup_profile(&self, username: &str) -> Result<CodeHostProfile, FetchError> {
        let url = user_url(&self.base_url, username)?;
        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        parse_user(&fetch_body(request).await?)
    }
}

/// `{base}/users/{username}` with `username` escaped as a single path segment.
pub fn user_url(base_url: &str, username: &str) -> Result<reqwest::Url, FetchError> {
    let mut url = reqwest::Url::parse(base_url)
        .map_err(|e| FetchError::Transport(format!("invalid base url {}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::Transport(format!("base url {} cannot take a path", base_url)))?
        .pop_if_empty()
        .push("users")
        .push(username);
    Ok(url)
}

#[derive(Debug, Deserialize)]
struct WireUser {
    followers: Option<u64>,
    created_at: Option<DateTime<Utc>>,
}

/// Decode a `/users/{username}` body. A profile without `created_at` is
/// treated as not found.
pub fn parse_user(body: &str) -> Result<CodeHostProfile, FetchError> {
    let user: WireUser = serde_json::from_str(body)?;
    let created_at = user.created_at.ok_or(FetchError::MissingField("created_at"))?;

    Ok(CodeHostProfile {
        followers: user.followers.unwrap_or(0),
        created_at,
    })
}
