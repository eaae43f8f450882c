use thiserror::Error;

use crate::request::HttpFailure;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] HttpFailure),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of the failure; `Some(0)` for network failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http(failure) => Some(failure.status),
            ClientError::Decode(_) => None,
        }
    }
}
