use thiserror::Error;

use crate::models::ErrorResponse;

/// Error types for the legacy Mojang auth client
///
/// [`McAuthError::Api`] carries a server reported error. Every other
/// variant is a failure: no response, or a response that could not be
/// interpreted.
#[derive(Error, Debug)]
pub enum McAuthError {
    #[error("Server error: {0}")]
    Api(ErrorResponse),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response body (HTTP {status}): {source}")]
    MalformedBody {
        status: reqwest::StatusCode,
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Skin error: {0}")]
    Skin(#[from] mc_skin::SkinError),
}

impl McAuthError {
    /// Server reported error, if this is one
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api(response) => Some(response),
            _ => None,
        }
    }

    /// True when no structured server error is available
    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Api(_))
    }
}

/// Three-way result of an operation.
///
/// Collapses every failure cause into [`Outcome::Failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success(T),
    Error(ErrorResponse),
    Failure,
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(McAuthError::Api(response)) => Self::Error(response),
            Err(_) => Self::Failure,
        }
    }
}

pub type Result<T> = std::result::Result<T, McAuthError>;
