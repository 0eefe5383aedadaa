//! File operations scoped to the caller's session.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::{header, StatusCode, Uri},
    response::IntoResponse,
    Json,
};

use crate::error::ApiError;
use crate::session::SessionToken;
use crate::AppState;

/// Handler for `PUT /files/{filename}`
///
/// Answers 201 with a `Location` pointing back at the request path. The
/// session is checked before the body, so an unknown session is reported as
/// 403 even when the upload is over the size limit.
pub async fn put(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    Path(filename): Path<String>,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.session_owner(&token)?;
    let content = body?;

    let owner = state.store.put_file(&token, &filename, content)?;
    tracing::info!(owner = %owner, filename = %filename, "File uploaded");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, uri.path().to_string())],
    ))
}

/// Handler for `GET /files/{filename}`
pub async fn get(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let content = state.store.get_file(&token, &filename)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/octet-stream")],
        content,
    ))
}

/// Handler for `DELETE /files/{filename}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
    Path(filename): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_file(&token, &filename)?;
    tracing::info!(filename = %filename, "File deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for `GET /files`
pub async fn list(
    State(state): State<Arc<AppState>>,
    SessionToken(token): SessionToken,
) -> Result<Json<Vec<String>>, ApiError> {
    let filenames = state.store.list_files(&token)?;
    Ok(Json(filenames))
}
