//! `X-Session` header extraction.
//!
//! The extractor only reads the header; whether the token belongs to a live
//! session is decided by the store when the handler runs.

use axum::{extract::FromRequestParts, http::request::Parts};
use file_store::StoreError;

use crate::error::ApiError;

/// Name of the header carrying the session token
pub const SESSION_HEADER: &str = "x-session";

/// Session token taken from the `X-Session` request header.
///
/// Rejects with 400 when the header is absent. A value that is not visible
/// ASCII can never match a minted token and is rejected as an invalid session.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(SESSION_HEADER) {
            Some(h) => h,
            None => {
                tracing::debug!("No X-Session header present");
                return Err(ApiError::MissingSession);
            }
        };

        match header.to_str() {
            Ok(token) => Ok(SessionToken(token.to_string())),
            Err(_) => {
                tracing::debug!("Invalid X-Session header encoding");
                Err(ApiError::Store(StoreError::InvalidSession))
            }
        }
    }
}
