// crates/kbid-verify/src/lib.rs
//
// kbid-verify: saltpack message verification and score-gated authentication.
//
// The local `keybase` client is the verification primitive. MessageVerifier
// reduces its result to a bool; AuthenticationGate combines that with the
// aggregate trust score from kbid-reputation.

pub mod gate;
pub mod health;
pub mod keybase_cli;
pub mod verifier;

pub use gate::AuthenticationGate;
pub use health::{HealthObserver, ProbeOutcome, TracingObserver};
pub use keybase_cli::KeybaseCli;
pub use verifier::MessageVerifier;
