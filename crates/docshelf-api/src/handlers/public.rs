//! Serves stored objects at their public URL.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;

use docshelf_core::error::AppError;
use docshelf_storage::mime;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /public/{key}
///
/// Content type is inferred from the key's extension, which is the
/// sanitized original filename.
pub async fn serve_object(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let data = state.storage_manager.get(&key).await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::mime_or_default(&key))
        .header(header::CONTENT_DISPOSITION, "inline")
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}
