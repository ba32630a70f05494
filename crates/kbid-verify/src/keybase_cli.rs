// crates/kbid-verify/src/keybase_cli.rs
//
// KeybaseCli: the local `keybase` client as the signature verification
// primitive. Runs `keybase verify -m <message> [-S <signer>]` and returns its
// stdout. Arguments are passed directly to the process, never through a shell.

use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use kbid_core::{KbidError, SignatureVerifier};

/// Runs the `keybase` executable at a fixed path.
#[derive(Debug, Clone)]
pub struct KeybaseCli {
    path: PathBuf,
}

impl KeybaseCli {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn run(&self, command: &mut Command) -> Result<String, KbidError> {
        let output: Output = command.kill_on_drop(true).output().await.map_err(|e| {
            KbidError::Primitive(format!("failed to run {}: {}", self.path.display(), e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(KbidError::Primitive(format!(
                "{} exited with {}: {}",
                self.path.display(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| KbidError::Primitive(format!("non-UTF-8 output: {}", e)))
    }
}

#[async_trait]
impl SignatureVerifier for KeybaseCli {
    async fn verify(&self, message: &str, signer: Option<&str>) -> Result<String, KbidError> {
        let mut command = Command::new(&self.path);
        command.arg("verify").arg("-m").arg(message);
        if let Some(signer) = signer {
            command.arg("-S").arg(signer);
        }
        self.run(&mut command).await
    }

    async fn version(&self) -> Result<String, KbidError> {
        let mut command = Command::new(&self.path);
        command.arg("--version");
        self.run(&mut command).await.map(|v| v.trim().to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable `sh` script standing in for keybase.
    fn fake_keybase(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("keybase");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_verify_passes_message_and_signer_as_arguments() {
        // `echo` stands in for keybase and prints back its arguments.
        let cli = KeybaseCli::new("echo");
        let out = cli
            .verify("BEGIN KEYBASE SALTPACK SIGNED MESSAGE. x", Some("alice"))
            .await
            .unwrap();
        assert_eq!(out, "verify -m BEGIN KEYBASE SALTPACK SIGNED MESSAGE. x -S alice\n");
    }

    #[tokio::test]
    async fn test_verify_without_signer_omits_flag() {
        let cli = KeybaseCli::new("echo");
        let out = cli.verify("msg", None).await.unwrap();
        assert_eq!(out, "verify -m msg\n");
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_error() {
        let cli = KeybaseCli::new("false");
        let err = cli.verify("msg", None).await.unwrap_err();
        assert!(matches!(err, KbidError::Primitive(_)));
    }

    #[tokio::test]
    async fn test_missing_executable_is_error() {
        let cli = KeybaseCli::new("/nonexistent/bin/keybase");
        let err = cli.version().await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bin/keybase"));
    }

    #[tokio::test]
    async fn test_version_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_keybase(dir.path(), "printf '  keybase version 6.2.4-20240101\\n\\n'");
        let cli = KeybaseCli::new(path);
        assert_eq!(cli.version().await.unwrap(), "keybase version 6.2.4-20240101");
    }

    #[tokio::test]
    async fn test_version_failure_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = fake_keybase(dir.path(), "echo 'keybase service not running' >&2\nexit 3");
        let err = KeybaseCli::new(path).version().await.unwrap_err();
        assert!(err.to_string().contains("keybase service not running"));
    }
}
