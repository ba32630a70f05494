// crates/kbid-platforms/src/twitter.rs
//
// Twitter social-network client.
//
// Every lookup first exchanges the API key and secret for an app-only bearer
// token (OAuth2 client-credentials grant), then calls `users/show.json`.
// Tokens are not cached.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use kbid_core::{FetchError, SocialCredentials, SocialNetworkClient, SocialProfile};

use crate::http::{build_client, fetch_body, normalize_base_url};

/// Base URL of the public Twitter API.
pub const TWITTER_API_URL: &str = "https://api.twitter.com";

/// Format of Twitter's `created_at`, e.g. "Wed Oct 10 20:19:24 +0000 2018".
const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Client for the Twitter v1.1 users API.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    pub base_url: String,
    client: reqwest::Client,
}

impl TwitterClient {
    pub fn new() -> Self {
        Self::with_base_url(TWITTER_API_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: build_client(),
        }
    }

    /// POST /oauth2/token with `grant_type=client_credentials`.
    async fn bearer_token(&self, credentials: &SocialCredentials) -> Result<String, FetchError> {
        let url = format!("{}/oauth2/token", self.base_url);
        let request = self
            .client
            .post(&url)
            .basic_auth(&credentials.api_key, Some(&credentials.api_secret))
            .form(&[("grant_type", "client_credentials")]);
        parse_token(&fetch_body(request).await?)
    }
}

impl Default for TwitterClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialNetworkClient for TwitterClient {
    /// GET /1.1/users/show.json?screen_name={username}
    async fn lookup_profile(
        &self,
        username: &str,
        credentials: &SocialCredentials,
    ) -> Result<SocialProfile, FetchError> {
        let token = self.bearer_token(credentials).await?;

        let url = format!("{}/1.1/users/show.json", self.base_url);
        let request = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[("screen_name", username)]);
        parse_user(&fetch_body(request).await?)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    followers_count: Option<u64>,
    created_at: Option<String>,
}

/// Decode an `/oauth2/token` body into the bearer token.
pub fn parse_token(body: &str) -> Result<String, FetchError> {
    let response: TokenResponse = serde_json::from_str(body)?;
    response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(FetchError::MissingField("access_token"))
}

/// Decode a `users/show.json` body.
pub fn parse_user(body: &str) -> Result<SocialProfile, FetchError> {
    let user: WireUser = serde_json::from_str(body)?;
    let raw = user.created_at.ok_or(FetchError::MissingField("created_at"))?;
    let created_at = parse_created_at(&raw)?;

    Ok(SocialProfile {
        followers_count: user.followers_count.unwrap_or(0),
        created_at,
    })
}

fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, FetchError> {
    DateTime::parse_from_str(raw, CREATED_AT_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FetchError::Decode(format!("created_at {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let body = r#"{"token_type": "bearer", "access_token": "AAAA%2FAAA"}"#;
        assert_eq!(parse_token(body).unwrap(), "AAAA%2FAAA");
    }

    #[test]
    fn test_parse_token_missing() {
        let body = r#"{"errors": [{"code": 99, "message": "Unable to verify your credentials"}]}"#;
        assert!(matches!(
            parse_token(body),
            Err(FetchError::MissingField("access_token"))
        ));
    }

    #[test]
    fn test_parse_user() {
        let body = r#"{
            "screen_name": "keybaseio",
            "followers_count": 2500,
            "created_at": "Wed Oct 10 20:19:24 +0000 2018"
        }"#;
        let profile = parse_user(body).unwrap();
        assert_eq!(profile.followers_count, 2500);
        assert_eq!(profile.created_at.to_rfc3339(), "2018-10-10T20:19:24+00:00");
    }

    #[test]
    fn test_parse_user_bad_timestamp() {
        let body = r#"{"followers_count": 1, "created_at": "yesterday"}"#;
        assert!(matches!(parse_user(body), Err(FetchError::Decode(_))));
    }
}
