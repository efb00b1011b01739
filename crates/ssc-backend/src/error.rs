use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provisioning server returned HTTP {0}")]
    Status(u16),

    #[error("Socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("XML-RPC fault {code}: {message}")]
    Fault { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Session server error: {0}")]
    Server(String),
}

impl BackendError {
    pub(crate) fn malformed(detail: impl std::fmt::Display) -> Self {
        BackendError::Malformed(detail.to_string())
    }
}
