// crates/kbid-reputation/src/degrade.rs
//
// The one place a platform fetch failure is turned into "no data".

use kbid_core::{FetchError, Platform};

/// Keep a successful lookup, or log the failure and return `None` so the
/// caller leaves the affected signals at zero.
pub fn or_degrade<T>(
    platform: Platform,
    lookup: &'static str,
    subject: &str,
    result: Result<T, FetchError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(
                %platform,
                lookup,
                subject,
                error = %e,
                "platform lookup failed, scoring affected signals as zero"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_passes_through() {
        assert_eq!(
            or_degrade(Platform::Github, "profile", "alice", Ok::<_, FetchError>(3)),
            Some(3)
        );
    }

    #[test]
    fn test_every_error_variant_degrades() {
        let errors = vec![
            FetchError::Transport("connection refused".to_string()),
            FetchError::Status(503),
            FetchError::ApiStatus(205),
            FetchError::MissingField("them"),
            FetchError::Decode("expected value".to_string()),
        ];
        for e in errors {
            assert_eq!(
                or_degrade::<u64>(Platform::Keybase, "profile", "alice", Err(e)),
                None
            );
        }
    }
}
