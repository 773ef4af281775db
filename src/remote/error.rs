//! Error types for remote gateway operations.

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Classified failure of a remote call.
///
/// Every variant carries the message shown to the user; the gateway reports
/// each failure to the notifier exactly once before returning it, so callers
/// may surface the message in their local status text without re-notifying.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    /// Connection-level failure (DNS, refused, TLS, aborted transfer).
    #[error("connection error: {message}")]
    Transport { message: String },

    /// The request did not complete within the configured deadline.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Non-success HTTP status, with the message extracted from the
    /// structured error body when one was present.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("response decode error: {message}")]
    Decode { message: String },

    /// Request rejected locally before any remote call was issued.
    #[error("{message}")]
    Validation { message: String },
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout { seconds }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Message suitable for status lines and notices.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether this failure was a local validation short-circuit, i.e. no
    /// remote call was issued.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
