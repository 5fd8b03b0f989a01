//! Route definitions for the DocShelf HTTP API.
//!
//! JSON routes are mounted under `/api`; stored objects are served under
//! `/public` so that the URLs produced by the storage manager resolve.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Multipart framing on top of the raw file bytes.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(group_routes())
        .merge(document_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(public_routes())
        .layer(DefaultBodyLimit::max(max_body))
        .layer(middleware::compression::build_compression_layer())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Admin login
fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(handlers::auth::login))
}

/// Group listing, creation, reordering, deletion, and per-group documents
fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups).post(handlers::group::create_group),
        )
        .route("/groups/renumber", post(handlers::group::renumber))
        .route("/groups/{id}", delete(handlers::group::delete_group))
        .route("/groups/{id}/move-up", post(handlers::group::move_up))
        .route("/groups/{id}/move-down", post(handlers::group::move_down))
        .route(
            "/groups/{id}/documents",
            get(handlers::document::list_group_documents).post(handlers::document::upload),
        )
        .route(
            "/groups/{id}/documents/renumber",
            post(handlers::document::renumber),
        )
}

/// Document listing, download, view, reordering, deletion
fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/documents", get(handlers::document::list_documents))
        .route("/documents/{id}", delete(handlers::document::delete_document))
        .route("/documents/{id}/download", get(handlers::document::download))
        .route("/documents/{id}/view", get(handlers::document::view))
        .route("/documents/{id}/move-up", post(handlers::document::move_up))
        .route("/documents/{id}/move-down", post(handlers::document::move_down))
}

/// Public object URLs
fn public_routes() -> Router<AppState> {
    Router::new().route("/public/{key}", get(handlers::public::serve_object))
}
