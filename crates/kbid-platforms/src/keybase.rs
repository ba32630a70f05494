// crates/kbid-platforms/src/keybase.rs
//
// Keybase identity-network client.
// Uses reqwest against the public Keybase REST API (`/_/api/1.0`).

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use kbid_core::{
    DeviceClass, FetchError, IdentityNetworkClient, IdentityProfile, ProofType, SignatureInfo,
};

use crate::http::{build_client, fetch_body, normalize_base_url};

/// Base URL of the public Keybase API.
pub const KEYBASE_API_URL: &str = "https://keybase.io/_/api/1.0";

/// Fields requested from `user/lookup.json`.
const LOOKUP_FIELDS: &str = "basics,proofs_summary,devices";

/// Client for the Keybase REST API.
#[derive(Debug, Clone)]
pub struct KeybaseClient {
    /// Base URL of the API (e.g., "https://keybase.io/_/api/1.0").
    pub base_url: String,
    client: reqwest::Client,
}

impl KeybaseClient {
    /// Create a client against the public Keybase API.
    pub fn new() -> Self {
        Self::with_base_url(KEYBASE_API_URL)
    }

    /// Create a client against a custom API base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: build_client(),
        }
    }
}

impl Default for KeybaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityNetworkClient for KeybaseClient {
    /// GET /user/lookup.json?fields=basics,proofs_summary,devices&username={username}
    async fn lookup_profile(&self, username: &str) -> Result<IdentityProfile, FetchError> {
        let url = format!("{}/user/lookup.json", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("fields", LOOKUP_FIELDS), ("username", username)]);
        parse_lookup(&fetch_body(request).await?)
    }

    /// GET /user/card.json?username={username}
    async fn lookup_follow_summary(&self, username: &str) -> Result<u64, FetchError> {
        let url = format!("{}/user/card.json", self.base_url);
        let request = self.client.get(&url).query(&[("username", username)]);
        parse_follow_summary(&fetch_body(request).await?)
    }

    /// GET /sig/get.json?uid={user_id}
    async fn lookup_signatures(&self, user_id: &str) -> Result<Vec<SignatureInfo>, FetchError> {
        let url = format!("{}/sig/get.json", self.base_url);
        let request = self.client.get(&url).query(&[("uid", user_id)]);
        parse_signatures(&fetch_body(request).await?)
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiStatus {
    code: i64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    status: Option<ApiStatus>,
    them: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: Option<String>,
    basics: Option<WireBasics>,
    proofs_summary: Option<WireProofsSummary>,
    devices: Option<HashMap<String, WireDevice>>,
}

#[derive(Debug, Deserialize)]
struct WireBasics {
    ctime: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WireProofsSummary {
    #[serde(default)]
    all: Vec<WireProof>,
}

#[derive(Debug, Deserialize)]
struct WireProof {
    proof_type: String,
}

#[derive(Debug, Deserialize)]
struct WireDevice {
    #[serde(rename = "type")]
    device_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CardResponse {
    status: Option<ApiStatus>,
    follow_summary: Option<WireFollowSummary>,
}

#[derive(Debug, Deserialize)]
struct WireFollowSummary {
    followers: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SigsResponse {
    status: Option<ApiStatus>,
    sigs: Option<Vec<WireSig>>,
}

#[derive(Debug, Deserialize)]
struct WireSig {
    ctime: i64,
}

/// Keybase reports failures as 2xx with a non-zero `status.code`.
fn check_status(status: Option<ApiStatus>) -> Result<(), FetchError> {
    match status {
        Some(ApiStatus { code: 0 }) => Ok(()),
        Some(ApiStatus { code }) => Err(FetchError::ApiStatus(code)),
        None => Err(FetchError::MissingField("status")),
    }
}

/// Decode a `user/lookup.json` body.
pub fn parse_lookup(body: &str) -> Result<IdentityProfile, FetchError> {
    let response: LookupResponse = serde_json::from_str(body)?;
    check_status(response.status)?;

    let user = response.them.ok_or(FetchError::MissingField("them"))?;
    let user_id = user.id.filter(|id| !id.is_empty());

    let created_at = user
        .basics
        .and_then(|b| b.ctime)
        .and_then(|ctime| DateTime::<Utc>::from_timestamp(ctime, 0));

    let proofs = user
        .proofs_summary
        .map(|summary| {
            summary
                .all
                .iter()
                .map(|p| ProofType::from_wire(&p.proof_type))
                .collect()
        })
        .unwrap_or_default();

    let devices = user
        .devices
        .map(|devices| {
            devices
                .values()
                .map(|d| DeviceClass::from_wire(d.device_type.as_deref().unwrap_or("")))
                .collect()
        })
        .unwrap_or_default();

    Ok(IdentityProfile {
        user_id,
        created_at,
        proofs,
        devices,
    })
}

/// Decode a `user/card.json` body into a follower count.
pub fn parse_follow_summary(body: &str) -> Result<u64, FetchError> {
    let response: CardResponse = serde_json::from_str(body)?;
    check_status(response.status)?;

    response
        .follow_summary
        .and_then(|s| s.followers)
        .ok_or(FetchError::MissingField("follow_summary.followers"))
}

/// Decode a `sig/get.json` body.
pub fn parse_signatures(body: &str) -> Result<Vec<SignatureInfo>, FetchError> {
    let response: SigsResponse = serde_json::from_str(body)?;
    check_status(response.status)?;

    let sigs = response.sigs.ok_or(FetchError::MissingField("sigs"))?;
    Ok(sigs
        .into_iter()
        .map(|s| SignatureInfo {
            created_at_epoch_seconds: s.ctime,
        })
        .collect())
}
