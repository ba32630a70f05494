// crates/kbid-verify/src/gate.rs
//
// AuthenticationGate: signed-message verification followed by a minimum
// aggregate score.
//
// Two sequential gates, short-circuiting on the first failure:
//   1. Verify: the message must verify as signed by the claimed identity.
//      Failure is an error (`KbidError::MessageNotVerified`).
//   2. Score: the identity's total must reach the configured minimum.
//      Failure is `Ok(false)`.

use std::path::Path;
use std::sync::Arc;

use tokio::task::JoinHandle;

use kbid_core::{resolve_config, EnvSnapshot, GateConfig, GateOptions, KbidError, SignatureVerifier};
use kbid_platforms::{GithubClient, KeybaseClient, TwitterClient};
use kbid_reputation::ScoreAggregator;

use crate::health::{probe, HealthObserver, ProbeOutcome, TracingObserver};
use crate::keybase_cli::KeybaseCli;
use crate::verifier::MessageVerifier;

/// Authenticates a caller from a signed message and their trust score.
#[derive(Clone)]
pub struct AuthenticationGate {
    config: GateConfig,
    primitive: Arc<dyn SignatureVerifier>,
    verifier: MessageVerifier,
    aggregator: ScoreAggregator,
    observer: Arc<dyn HealthObserver>,
}

impl AuthenticationGate {
    /// Resolve `options` against `env` and build a gate backed by the public
    /// platform APIs and the local `keybase` client.
    pub fn from_options(options: &GateOptions, env: &EnvSnapshot) -> Result<Self, KbidError> {
        let config = resolve_config(options, env)?;
        Self::from_config(config)
    }

    /// Build a gate backed by the public platform APIs and the local
    /// `keybase` client, reporting health to the tracing observer.
    pub fn from_config(config: GateConfig) -> Result<Self, KbidError> {
        Self::from_config_with_observer(config, Arc::new(TracingObserver))
    }

    /// Like [`from_config`](Self::from_config), with `observer` receiving the
    /// construction-time health probe. The probe runs in the background when
    /// called inside a tokio runtime and is skipped otherwise.
    pub fn from_config_with_observer(
        config: GateConfig,
        observer: Arc<dyn HealthObserver>,
    ) -> Result<Self, KbidError> {
        let primitive = Arc::new(KeybaseCli::new(config.keybase_path.clone()));

        let mut aggregator =
            ScoreAggregator::new(Arc::new(KeybaseClient::new()), Arc::new(GithubClient::new()));
        if let Some(credentials) = config.social_credentials.clone() {
            aggregator = aggregator.with_social(Arc::new(TwitterClient::new()), credentials);
        }

        let gate = Self::new(config, primitive, aggregator)?.with_observer(observer);
        if tokio::runtime::Handle::try_current().is_ok() {
            drop(gate.spawn_health_probe());
        } else {
            tracing::debug!(
                primitive = %gate.config.keybase_path.display(),
                "no tokio runtime; skipping construction health probe"
            );
        }
        Ok(gate)
    }

    /// Assemble a gate from explicit parts.
    ///
    /// `config.social_credentials` is informational here; Twitter scoring is
    /// whatever `aggregator` was built with.
    pub fn new(
        config: GateConfig,
        primitive: Arc<dyn SignatureVerifier>,
        aggregator: ScoreAggregator,
    ) -> Result<Self, KbidError> {
        if config.keybase_path.as_os_str().is_empty() {
            return Err(KbidError::Config(
                "keybase_path must name the keybase executable".to_string(),
            ));
        }

        Ok(Self {
            config,
            verifier: MessageVerifier::new(primitive.clone()),
            primitive,
            aggregator,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the observer that receives health-probe results.
    pub fn with_observer(mut self, observer: Arc<dyn HealthObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn min_score(&self) -> u32 {
        self.config.min_score
    }

    pub fn keybase_path(&self) -> &Path {
        &self.config.keybase_path
    }

    pub fn verifier(&self) -> &MessageVerifier {
        &self.verifier
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    /// Probe the verification primitive and wait for the outcome.
    pub async fn probe_health(&self) -> ProbeOutcome {
        probe(
            self.primitive.as_ref(),
            &self.config.keybase_path,
            self.observer.as_ref(),
        )
        .await
    }

    /// Probe the verification primitive in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_health_probe(&self) -> JoinHandle<ProbeOutcome> {
        let primitive = self.primitive.clone();
        let observer = self.observer.clone();
        let path = self.config.keybase_path.clone();
        tokio::spawn(async move { probe(primitive.as_ref(), &path, observer.as_ref()).await })
    }

    /// Authenticate `username` from a message they signed.
    ///
    /// Returns `Err(KbidError::MessageNotVerified)` if the message does not
    /// verify as `username`'s signature over `expected_text`, regardless of
    /// score. Otherwise returns whether the identity's total score is at
    /// least the configured minimum.
    pub async fn authenticate(
        &self,
        message: &str,
        expected_text: &str,
        username: &str,
    ) -> Result<bool, KbidError> {
        if !self
            .verifier
            .verify_message_from_identity(message, expected_text, username)
            .await
        {
            tracing::info!(username, "authentication rejected: message not verified");
            return Err(KbidError::MessageNotVerified);
        }

        let total = self.aggregator.score_user(username).await;
        let accepted = total >= self.config.min_score;
        tracing::info!(
            username,
            total,
            min_score = self.config.min_score,
            accepted,
            "authentication scored"
        );
        Ok(accepted)
    }
}
