// crates/kbid-platforms/src/http.rs
//
// Shared reqwest plumbing for the platform clients.

use std::time::Duration;

use kbid_core::FetchError;

/// User agent sent on every platform request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("kbid/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by a platform client.
///
/// Timeouts are the transport's concern; the scorers treat a timed-out
/// request like any other failed fetch.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Send a request and return its body, mapping transport errors and
/// non-success statuses to `FetchError`.
pub async fn fetch_body(request: reqwest::RequestBuilder) -> Result<String, FetchError> {
    let response = request
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(url = %response.url(), %status, "platform request rejected");
        return Err(FetchError::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::Transport(format!("body read failed: {}", e)))
}

/// Trim a trailing slash so paths can be appended with `format!`.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}
