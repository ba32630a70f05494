// crates/kbid-core/src/traits.rs

use async_trait::async_trait;

use crate::error::{FetchError, KbidError};
use crate::profile::{CodeHostProfile, IdentityProfile, SignatureInfo, SocialCredentials, SocialProfile};

/// Lookups against the Keybase identity network.
///
/// Implemented by kbid-platforms (`KeybaseClient`).
#[async_trait]
pub trait IdentityNetworkClient: Send + Sync {
    /// Look up the identity's basics, proof summary, and devices.
    async fn lookup_profile(&self, username: &str) -> Result<IdentityProfile, FetchError>;

    /// Look up the identity's follower count.
    async fn lookup_follow_summary(&self, username: &str) -> Result<u64, FetchError>;

    /// Look up every signature made by the user id's signing credentials.
    async fn lookup_signatures(&self, user_id: &str) -> Result<Vec<SignatureInfo>, FetchError>;
}

/// Lookups against the code host.
///
/// Implemented by kbid-platforms (`GithubClient`).
#[async_trait]
pub trait CodeHostClient: Send + Sync {
    async fn lookup_profile(&self, username: &str) -> Result<CodeHostProfile, FetchError>;
}

/// Lookups against the social network. Requires API credentials.
///
/// Implemented by kbid-platforms (`TwitterClient`).
#[async_trait]
pub trait SocialNetworkClient: Send + Sync {
    async fn lookup_profile(
        &self,
        username: &str,
        credentials: &SocialCredentials,
    ) -> Result<SocialProfile, FetchError>;
}

/// The external signed-message verification primitive.
///
/// Implemented by kbid-verify (`KeybaseCli`).
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    /// Verify a signed message, optionally constrained to `signer`'s keys.
    /// Returns the verified cleartext. Any failure, including a bad
    /// signature, is an `Err`.
    async fn verify(&self, message: &str, signer: Option<&str>) -> Result<String, KbidError>;

    /// Capability probe. Returns the primitive's version string.
    async fn version(&self) -> Result<String, KbidError>;
}
