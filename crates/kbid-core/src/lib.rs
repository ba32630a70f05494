// crates/kbid-core/src/lib.rs
//
// kbid-core: Core types, traits, and configuration for Keybase identity scoring.
//
// This is the leaf crate every other crate in the workspace depends on.
// It defines the score record model, identity tiers, platform profile types,
// error types, and the trait interfaces of the external collaborators
// (platform clients and the signature verification primitive).

pub mod config;
pub mod error;
pub mod profile;
pub mod record;
pub mod signal;
pub mod tier;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use kbid_core::ScoreRecord;`

pub use config::{resolve_config, EnvSnapshot, GateConfig, GateOptions};
pub use error::{FetchError, KbidError};
pub use profile::{
    CodeHostProfile, DeviceClass, IdentityProfile, ProofType, SignatureInfo, SocialCredentials,
    SocialProfile,
};
pub use record::ScoreRecord;
pub use signal::{Platform, Signal};
pub use tier::IdentityTier;
pub use traits::{CodeHostClient, IdentityNetworkClient, SignatureVerifier, SocialNetworkClient};
