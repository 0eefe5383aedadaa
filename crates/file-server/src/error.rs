//! Mapping of store and request failures onto HTTP responses.
//!
//! Every error is answered with a JSON body of the form
//! `{"error": "<message>"}`.

use axum::{
    extract::rejection::{BytesRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use file_store::StoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("X-Session required header is missing.")]
    MissingSession,

    #[error("Request body must be a JSON object: {0}")]
    InvalidJson(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Body(#[from] BytesRejection),

    #[error("Not found.")]
    RouteNotFound,

    #[error("Method not allowed.")]
    MethodNotAllowed,
}

/// JSON error payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(StoreError::InvalidInput | StoreError::AlreadyExists) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(StoreError::InvalidCredentials | StoreError::InvalidSession) => {
                StatusCode::FORBIDDEN
            }
            ApiError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::MissingSession | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, "Request failed: {}", self);
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_status_codes() {
        let cases = [
            (StoreError::InvalidInput, StatusCode::BAD_REQUEST),
            (StoreError::AlreadyExists, StatusCode::BAD_REQUEST),
            (StoreError::InvalidCredentials, StatusCode::FORBIDDEN),
            (StoreError::InvalidSession, StatusCode::FORBIDDEN),
            (StoreError::NotFound, StatusCode::NOT_FOUND),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected, "{err:?}");
        }
    }

    #[test]
    fn test_store_error_message_passes_through() {
        let err = ApiError::from(StoreError::AlreadyExists);
        assert_eq!(err.to_string(), "Username already exists.");
    }

    #[test]
    fn test_missing_session_is_bad_request() {
        assert_eq!(ApiError::MissingSession.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_allowed_status() {
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }
}
