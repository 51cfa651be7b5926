//! Error taxonomy for the upstream integration layer.
//!
//! Only the auth pair (`OAuth2Source` / `TokenCache`) lets these escape.
//! Listing and image operations absorb them into a degraded result.

use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required settings are missing or unusable. Fatal at startup.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Identity provider answered with a non-2xx status.
    #[error("authentication failed: identity provider responded with {status}")]
    AuthenticationFailed { status: StatusCode },

    /// Network level failure, including client timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body does not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Commerce API answered with a non-2xx status.
    #[error("upstream responded with {0}")]
    UpstreamStatus(StatusCode),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Stable label for logs and metric series.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Configuration(_) => "configuration",
            ApiError::AuthenticationFailed { .. } => "authentication_failed",
            ApiError::Transport(_) => "transport",
            ApiError::MalformedResponse(_) => "malformed_response",
            ApiError::UpstreamStatus(_) => "upstream_status",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
