// crates/kbid-core/src/config.rs
//
// Configuration for the authentication gate.
//
// Options come from the caller (or a TOML file), with environment variables
// as a fallback. Resolution is an explicit step over an environment snapshot,
// so business logic never reads process environment directly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::KbidError;
use crate::profile::SocialCredentials;
use crate::tier::PASSABLE_MIN_SCORE;

/// Environment variable naming the `keybase` executable.
pub const ENV_KEYBASE_PATH: &str = "KEYBASEID_KEYBASE";
/// Environment variable holding the minimum authentication score.
pub const ENV_MIN_SCORE: &str = "KEYBASEID_SCORE";
/// Environment variable holding the Twitter API key.
pub const ENV_TWITTER_KEY: &str = "KEYBASEID_TWITTER_KEY";
/// Environment variable holding the Twitter API secret.
pub const ENV_TWITTER_SECRET: &str = "KEYBASEID_TWITTER_SECRET";

/// Minimum score used when neither an option nor the environment sets one.
pub const DEFAULT_MIN_SCORE: u32 = PASSABLE_MIN_SCORE;

/// Caller-supplied gate options. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GateOptions {
    /// Path to the local `keybase` executable.
    #[serde(default)]
    pub keybase_path: Option<PathBuf>,

    /// Minimum total score required to authenticate.
    #[serde(default)]
    pub min_score: Option<u32>,

    /// Twitter API key. Must be given together with `twitter_api_secret`.
    #[serde(default)]
    pub twitter_api_key: Option<String>,

    /// Twitter API secret. Must be given together with `twitter_api_key`.
    #[serde(default)]
    pub twitter_api_secret: Option<String>,
}

impl GateOptions {
    /// Load options from a TOML file at the given path.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, KbidError> {
        let contents = fs::read_to_string(path)?;
        let options: GateOptions = toml::from_str(&contents)?;
        Ok(options)
    }
}

/// A snapshot of the environment variables the gate recognizes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    pub keybase_path: Option<String>,
    pub min_score: Option<String>,
    pub twitter_api_key: Option<String>,
    pub twitter_api_secret: Option<String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_env() -> Self {
        Self {
            keybase_path: std::env::var(ENV_KEYBASE_PATH).ok(),
            min_score: std::env::var(ENV_MIN_SCORE).ok(),
            twitter_api_key: std::env::var(ENV_TWITTER_KEY).ok(),
            twitter_api_secret: std::env::var(ENV_TWITTER_SECRET).ok(),
        }
    }
}

/// Fully-resolved gate configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Path to the local `keybase` executable.
    pub keybase_path: PathBuf,
    /// Minimum total score required to authenticate.
    pub min_score: u32,
    /// Twitter credentials, when both halves were supplied.
    pub social_credentials: Option<SocialCredentials>,
}

/// Resolve options against an environment snapshot.
///
/// Explicit options win over the environment. Empty strings count as unset.
/// An explicit minimum score of `0` is honored.
pub fn resolve_config(options: &GateOptions, env: &EnvSnapshot) -> Result<GateConfig, KbidError> {
    let keybase_path = options
        .keybase_path
        .clone()
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| non_empty(&env.keybase_path).map(PathBuf::from))
        .ok_or_else(|| {
            KbidError::Config(format!(
                "No keybase_path option was specified and no {} environment variable was found",
                ENV_KEYBASE_PATH
            ))
        })?;

    let min_score = match options.min_score {
        Some(score) => score,
        None => match non_empty(&env.min_score) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                KbidError::Config(format!(
                    "{} must be a non-negative integer, got {:?}",
                    ENV_MIN_SCORE, raw
                ))
            })?,
            None => DEFAULT_MIN_SCORE,
        },
    };

    let api_key = non_empty(&options.twitter_api_key).or_else(|| non_empty(&env.twitter_api_key));
    let api_secret =
        non_empty(&options.twitter_api_secret).or_else(|| non_empty(&env.twitter_api_secret));

    let social_credentials = match (api_key, api_secret) {
        (Some(api_key), Some(api_secret)) => Some(SocialCredentials {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }),
        (None, None) => None,
        (Some(_), None) => {
            return Err(KbidError::Config(format!(
                "twitter_api_key was given without twitter_api_secret ({})",
                ENV_TWITTER_SECRET
            )))
        }
        (None, Some(_)) => {
            return Err(KbidError::Config(format!(
                "twitter_api_secret was given without twitter_api_key ({})",
                ENV_TWITTER_KEY
            )))
        }
    };

    Ok(GateConfig {
        keybase_path,
        min_score,
        social_credentials,
    })
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
