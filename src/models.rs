use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ssc_backend::{BackendError, ProvisioningRecord, SessionRecord};
use ssc_core::{Identifier, SyntaxError};

/// Shown when the login is valid but nothing is bound to it.
pub const NOT_FOUND_MESSAGE: &str = "No sessions were found which matched the search criteria.";

/// Response for a session lookup.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    pub login: Option<String>,
    pub mac_address: Option<String>,
    pub messages: Vec<String>,
    /// True when the client should offer Delete/No with `login_del = login`.
    pub deletable: bool,
}

impl LookupResponse {
    pub fn not_found(login: &Identifier) -> Self {
        Self {
            login: Some(login.to_string()),
            messages: vec![NOT_FOUND_MESSAGE.to_string()],
            ..Self::default()
        }
    }

    pub fn found(login: &Identifier, record: &ProvisioningRecord, session: &SessionRecord) -> Self {
        Self {
            login: Some(login.to_string()),
            mac_address: record.mac_address().map(str::to_string),
            messages: session.human_readable(),
            deletable: true,
        }
    }
}

/// Delete confirmation form.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub login_del: Option<String>,
    pub submit: Option<String>,
}

impl DeleteForm {
    /// Only the Delete button confirms; No (or anything else) cancels.
    pub fn confirmed(&self) -> bool {
        self.submit.as_deref().map(str::trim) == Some("Delete")
    }
}

/// Response for a delete request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub login: Option<String>,
    pub deleted: bool,
    pub messages: Vec<String>,
}

impl DeleteResponse {
    pub fn deleted(login: &Identifier) -> Self {
        Self {
            login: Some(login.to_string()),
            deleted: true,
            messages: vec![format!("Session {} was deleted.", login)],
        }
    }

    pub fn cancelled(login: Option<String>) -> Self {
        Self {
            login,
            deleted: false,
            messages: vec!["Deletion cancelled.".to_string()],
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub messages: Vec<String>,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("Provisioning server request failed: {0}")]
    Provisioning(#[source] BackendError),

    #[error("Session service request failed: {0}")]
    Session(#[source] BackendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Syntax(_) => StatusCode::BAD_REQUEST,
            ApiError::Provisioning(BackendError::Timeout(_))
            | ApiError::Session(BackendError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Provisioning(_) | ApiError::Session(_) => StatusCode::BAD_GATEWAY,
        };

        match &self {
            ApiError::Syntax(err) => tracing::info!(reason = %err.reason(), "rejected login"),
            other => tracing::error!("{}", other),
        }

        let body = ErrorResponse {
            messages: vec![self.to_string()],
        };
        (status, Json(body)).into_response()
    }
}
