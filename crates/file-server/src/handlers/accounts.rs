//! Account registration and login.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// Body of `POST /register` and `POST /login`
///
/// Either field may be omitted; a missing field is treated as an empty
/// string and fails the same checks an empty value would.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Successful login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Handler for `POST /register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(credentials) = payload?;

    state
        .store
        .register(credentials.username(), credentials.password())?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(credentials) = payload?;

    let token = state
        .store
        .login(credentials.username(), credentials.password())?;

    Ok(Json(LoginResponse { token }))
}
