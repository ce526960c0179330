//! Client error type.
//!
//! ERROR HANDLING
//! ==============
//! Every fallible client path returns `ClientError`. Callers in the browser
//! glue log these and keep the game view running; none of them are fatal.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Failures surfaced by the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The real-time transport rejected an operation.
    #[error("transport error {code}: {message}")]
    Transport { code: String, message: String },
    /// A server query answered with a non-success status.
    #[error("request to {url} failed: {status}")]
    Http { url: String, status: u16 },
    /// The request never reached the server.
    #[error("request to {url} could not be sent: {message}")]
    Network { url: String, message: String },
    /// A payload did not have the expected shape.
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
    /// The page supplied an unusable configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// The operation needs the browser.
    #[error("not available outside the browser")]
    Unavailable,
}

impl ClientError {
    /// Short machine-readable code, as logged next to the message.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Transport { code, .. } => code,
            Self::Http { .. } => "http",
            Self::Network { .. } => "network",
            Self::Decode(_) => "decode",
            Self::Config(_) => "config",
            Self::Unavailable => "unavailable",
        }
    }
}
