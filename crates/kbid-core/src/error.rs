use thiserror::Error;

/// Errors returned by the platform profile clients.
///
/// Scorers never propagate these: any variant degrades the affected signals
/// to zero points.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The platform answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The platform answered 2xx but reported a failure in its own status block.
    #[error("API status code {0}")]
    ApiStatus(i64),

    /// A field the scorer depends on was absent from the response.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Errors surfaced by configuration, verification, and authentication.
#[derive(Debug, Error)]
pub enum KbidError {
    /// Missing or invalid configuration. Raised synchronously at construction.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The signed message did not verify against the expected text or signer.
    #[error("Could not verify user message")]
    MessageNotVerified,

    /// The verification primitive could not be run or reported a failure.
    #[error("Verification primitive error: {0}")]
    Primitive(String),

    /// I/O error (reading configuration files, spawning processes).
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for KbidError {
    fn from(e: std::io::Error) -> Self {
        KbidError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for KbidError {
    fn from(e: toml::de::Error) -> Self {
        KbidError::Config(e.to_string())
    }
}
