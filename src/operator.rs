//! Operator name extraction.
//!
//! The authenticating reverse proxy passes the logged-in operator in
//! `X-Remote-User`. The session service wants that name with every request.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Operator named by the proxy, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser(pub Option<String>);

impl RemoteUser {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user = headers
            .get(REMOTE_USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Self(user)
    }

    /// The operator name, or `default` when the proxy sent none.
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.0.as_deref().unwrap_or(default)
    }
}

impl<S> FromRequestParts<S> for RemoteUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
