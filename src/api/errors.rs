//! Error taxonomy for the API client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not signed in. Run `khelo-admin login --token <token>` first")]
    NotSignedIn,

    #[error("session rejected by the API (401). Run `khelo-admin login` again")]
    Unauthorized,

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
