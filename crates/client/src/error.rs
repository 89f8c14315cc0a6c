//! Error types for the school API client.

/// Result type for client operations.
pub type SchoolApiResult<T> = Result<T, SchoolApiError>;

/// Error types that can occur when calling the school API.
#[derive(Debug, thiserror::Error)]
pub enum SchoolApiError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    /// Upstream body was not valid JSON.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SchoolApiError {
    /// Create an upstream error from a status code and raw response body.
    pub fn from_response(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Map a transport failure, separating timeouts from other errors.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Upstream status code, if the upstream responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the upstream rejected the request.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
