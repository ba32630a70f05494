// crates/kbid-verify/src/health.rs
//
// Best-effort capability probe of the verification primitive.
//
// A failed probe is reported to a HealthObserver and never blocks or fails
// gate construction.

use std::path::Path;

use serde::Serialize;

use kbid_core::SignatureVerifier;

/// Result of probing the verification primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProbeOutcome {
    /// The primitive answered its version command.
    Healthy { version: String },
    /// The primitive could not be run.
    Unhealthy { reason: String },
}

impl ProbeOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeOutcome::Healthy { .. })
    }
}

/// Receives probe results.
pub trait HealthObserver: Send + Sync {
    fn probe_failed(&self, primitive: &Path, reason: &str);

    fn probe_succeeded(&self, _primitive: &Path, _version: &str) {}
}

/// Default observer: logs through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl HealthObserver for TracingObserver {
    fn probe_failed(&self, primitive: &Path, reason: &str) {
        tracing::warn!(
            primitive = %primitive.display(),
            reason,
            "failed to run version command on the keybase executable"
        );
    }

    fn probe_succeeded(&self, primitive: &Path, version: &str) {
        tracing::debug!(primitive = %primitive.display(), version, "keybase executable ok");
    }
}

/// Run the primitive's version command and report the outcome.
pub async fn probe(
    primitive: &dyn SignatureVerifier,
    primitive_path: &Path,
    observer: &dyn HealthObserver,
) -> ProbeOutcome {
    match primitive.version().await {
        Ok(version) => {
            observer.probe_succeeded(primitive_path, &version);
            ProbeOutcome::Healthy { version }
        }
        Err(e) => {
            let reason = e.to_string();
            observer.probe_failed(primitive_path, &reason);
            ProbeOutcome::Unhealthy { reason }
        }
    }
}
