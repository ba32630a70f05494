// crates/kbid-verify/src/verifier.rs
//
// MessageVerifier: collapses the verification primitive's result to a bool.

use std::sync::Arc;

use kbid_core::SignatureVerifier;

/// Checks that a signed message's cleartext matches an expected text.
///
/// Every primitive failure, including a rejected signature, reads as `false`.
#[derive(Clone)]
pub struct MessageVerifier {
    primitive: Arc<dyn SignatureVerifier>,
}

impl MessageVerifier {
    pub fn new(primitive: Arc<dyn SignatureVerifier>) -> Self {
        Self { primitive }
    }

    /// `true` iff the primitive verifies `message` (as signed by
    /// `claimed_identity`, when given) and its output is non-empty and
    /// exactly equal to `expected_text`.
    pub async fn verify(
        &self,
        message: &str,
        expected_text: &str,
        claimed_identity: Option<&str>,
    ) -> bool {
        if expected_text.is_empty() {
            return false;
        }

        match self.primitive.verify(message, claimed_identity).await {
            Ok(cleartext) => !cleartext.is_empty() && cleartext == expected_text,
            Err(e) => {
                tracing::debug!(
                    claimed_identity = claimed_identity.unwrap_or("-"),
                    error = %e,
                    "signed message did not verify"
                );
                false
            }
        }
    }

    /// Verify content only, accepting any signer.
    pub async fn verify_message_only(&self, message: &str, expected_text: &str) -> bool {
        self.verify(message, expected_text, None).await
    }

    /// Verify content and that `claimed_identity` signed it.
    pub async fn verify_message_from_identity(
        &self,
        message: &str,
        expected_text: &str,
        claimed_identity: &str,
    ) -> bool {
        self.verify(message, expected_text, Some(claimed_identity))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kbid_core::KbidError;
    use std::sync::Mutex;

    /// Returns `cleartext` for messages signed by `signer` (or any signer when
    /// unconstrained) and fails otherwise.
    struct FakePrimitive {
        cleartext: String,
        signer: String,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl FakePrimitive {
        fn new(cleartext: &str, signer: &str) -> Self {
            Self {
                cleartext: cleartext.to_string(),
                signer: signer.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SignatureVerifier for FakePrimitive {
        async fn verify(&self, message: &str, signer: Option<&str>) -> Result<String, KbidError> {
            self.calls.lock().unwrap().push(signer.map(str::to_string));
            if message != "signed" {
                return Err(KbidError::Primitive("ERROR bad signature".to_string()));
            }
            match signer {
                Some(s) if s != self.signer => {
                    Err(KbidError::Primitive(format!("signed by {}, not {}", self.signer, s)))
                }
                _ => Ok(self.cleartext.clone()),
            }
        }

        async fn version(&self) -> Result<String, KbidError> {
            Ok("keybase version 6.2.4".to_string())
        }
    }

    fn verifier(primitive: FakePrimitive) -> (MessageVerifier, Arc<FakePrimitive>) {
        let primitive = Arc::new(primitive);
        (MessageVerifier::new(primitive.clone()), primitive)
    }

    #[tokio::test]
    async fn test_exact_match_verifies() {
        let (v, _) = verifier(FakePrimitive::new("login nonce 42", "alice"));
        assert!(v.verify_message_only("signed", "login nonce 42").await);
        assert!(
            v.verify_message_from_identity("signed", "login nonce 42", "alice")
                .await
        );
    }

    #[tokio::test]
    async fn test_no_fuzzy_match() {
        let (v, _) = verifier(FakePrimitive::new("login nonce 42\n", "alice"));
        assert!(!v.verify_message_only("signed", "login nonce 42").await);
        assert!(!v.verify_message_only("signed", "login nonce 4").await);
    }

    #[tokio::test]
    async fn test_wrong_signer_is_false() {
        let (v, _) = verifier(FakePrimitive::new("hello", "alice"));
        assert!(!v.verify_message_from_identity("signed", "hello", "mallory").await);
    }

    #[tokio::test]
    async fn test_primitive_failure_is_false() {
        let (v, _) = verifier(FakePrimitive::new("hello", "alice"));
        assert!(!v.verify_message_only("tampered", "hello").await);
    }

    #[tokio::test]
    async fn test_empty_output_or_expectation_is_false() {
        let (v, _) = verifier(FakePrimitive::new("", "alice"));
        assert!(!v.verify_message_only("signed", "").await);

        let (v, primitive) = verifier(FakePrimitive::new("hello", "alice"));
        assert!(!v.verify_message_only("signed", "").await);
        assert!(primitive.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_identity_constraint_reaches_primitive() {
        let (v, primitive) = verifier(FakePrimitive::new("hello", "alice"));
        v.verify_message_only("signed", "hello").await;
        v.verify_message_from_identity("signed", "hello", "alice").await;
        let calls = primitive.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[None, Some("alice".to_string())]);
    }
}
