//! file-server library: HTTP gateway over the file store.
//!
//! Exposes the router and state so integration tests can drive the
//! service in-process.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use file_store::Store;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use session::{SessionToken, SESSION_HEADER};

/// Shared application state
pub struct AppState {
    pub store: Store,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self { store, config }
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = match state.config.max_upload_bytes {
        Some(limit) => DefaultBodyLimit::max(limit),
        None => DefaultBodyLimit::disable(),
    };

    Router::new()
        // Accounts
        .route("/register", post(handlers::accounts::register))
        .route("/login", post(handlers::accounts::login))
        // Files (require X-Session); the upload limit applies only here
        .route("/files", get(handlers::files::list).layer(body_limit))
        .route(
            "/files/{filename}",
            put(handlers::files::put)
                .get(handlers::files::get)
                .delete(handlers::files::delete)
                .layer(body_limit),
        )
        // Liveness probe
        .route("/_status/healthz", get(handlers::status::healthz))
        // Must follow every route it applies to
        .method_not_allowed_fallback(handlers::status::method_not_allowed)
        .fallback(handlers::status::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
