// crates/kbid-core/src/profile.rs
//
// Platform profile data as consumed by the scorers. The platform clients
// decode their wire formats into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of external account or ownership proof attached to a Keybase identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    Twitter,
    Github,
    Reddit,
    Hackernews,
    Dns,
    GenericWebSite,
    /// Any proof type without a point value.
    Other(String),
}

impl ProofType {
    /// Map a Keybase `proof_type` string to a `ProofType`.
    pub fn from_wire(value: &str) -> Self {
        match value {
            "twitter" => ProofType::Twitter,
            "github" => ProofType::Github,
            "reddit" => ProofType::Reddit,
            "hackernews" => ProofType::Hackernews,
            "dns" => ProofType::Dns,
            "generic_web_site" => ProofType::GenericWebSite,
            other => ProofType::Other(other.to_string()),
        }
    }
}

/// Class of a device registered to a Keybase identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    /// Paper keys, backups, and anything else.
    Other(String),
}

impl DeviceClass {
    pub fn from_wire(value: &str) -> Self {
        match value {
            "desktop" => DeviceClass::Desktop,
            "mobile" => DeviceClass::Mobile,
            other => DeviceClass::Other(other.to_string()),
        }
    }

    /// Whether this device earns the device bonus.
    pub fn is_personal(&self) -> bool {
        matches!(self, DeviceClass::Desktop | DeviceClass::Mobile)
    }
}

/// A Keybase identity as returned by the user lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    /// Keybase user id, used to look up signatures. Absent ids skip the
    /// signature-age signal only.
    pub user_id: Option<String>,
    /// Account creation time, when the `basics` block was present.
    pub created_at: Option<DateTime<Utc>>,
    /// All proofs in the identity's proof summary.
    pub proofs: Vec<ProofType>,
    /// All registered devices.
    pub devices: Vec<DeviceClass>,
}

/// A signature made by one of the identity's signing credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Signature creation time in seconds since the Unix epoch.
    pub created_at_epoch_seconds: i64,
}

/// A GitHub user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeHostProfile {
    pub followers: u64,
    pub created_at: DateTime<Utc>,
}

/// A Twitter user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub followers_count: u64,
    pub created_at: DateTime<Utc>,
}

/// Twitter API key and secret, always supplied as a pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for SocialCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
