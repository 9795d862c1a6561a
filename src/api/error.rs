//! API error types

use thiserror::Error;

/// Error normalized from any API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered `success: false` or a non-2xx status
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// Input rejected locally before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No vendor is logged in
    #[error("Not logged in. Run `vendor-panel login` first")]
    NotLoggedIn,

    /// Multipart file could not be read
    #[error("Failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: message.into(),
        }
    }

    /// True when the request was blocked locally
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
