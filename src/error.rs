//! Error types for the REST client.

use thiserror::Error;

/// REST client error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response arrived within the client timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection, TLS or other transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Response body did not match the endpoint's schema.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend answered with a non-2xx status.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if the backend sent one.
        message: Option<String>,
    },
}

impl ApiError {
    /// Status code of a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message supplied by the server, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    pub fn class(&self) -> FailureClass {
        FailureClass::of(self)
    }
}

/// Coarse bucket a failure falls into, used for logging and user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Timeout,
    RateLimited,
    Other,
}

impl FailureClass {
    pub fn of(err: &ApiError) -> Self {
        match err {
            ApiError::Timeout => Self::Timeout,
            ApiError::Http(e) if e.is_timeout() => Self::Timeout,
            e if e.is_rate_limited() => Self::RateLimited,
            _ => Self::Other,
        }
    }
}

/// Result type alias for REST client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let limited = ApiError::Status {
            status: 429,
            message: None,
        };
        let server = ApiError::Status {
            status: 500,
            message: Some("boom".into()),
        };

        assert_eq!(limited.class(), FailureClass::RateLimited);
        assert_eq!(server.class(), FailureClass::Other);
        assert_eq!(ApiError::Timeout.class(), FailureClass::Timeout);
        assert_eq!(server.server_message(), Some("boom"));
        assert_eq!(limited.server_message(), None);
    }

    #[test]
    fn test_blank_server_message_is_ignored() {
        let err = ApiError::Status {
            status: 400,
            message: Some("  ".into()),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "API error (400):   ");
    }
}
