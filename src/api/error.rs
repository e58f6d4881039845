use reqwest::StatusCode;

use crate::models::validation::ListingError;

/// Failures talking to the listing backend
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not logged in; run `listing-desk login` first")]
    NotAuthenticated,
    #[error("The backend rejected the session or credentials")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(String),
    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] ListingError),
}

impl ApiError {
    /// Map a non-success response to an error, `what` names the resource
    pub fn from_status(status: StatusCode, what: &str, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound(what.to_string()),
            _ => ApiError::Status { status, body },
        }
    }
}
