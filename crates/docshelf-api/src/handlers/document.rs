//! Document upload, download, view, reorder and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::Response;
use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use docshelf_core::error::AppError;
use docshelf_core::ordering::MoveDirection;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_service::{UploadRequest, ViewLink};

use crate::dto::response::{
    ApiResponse, DocumentResponse, MessageResponse, MoveResponse, RenumberResponse,
};
use crate::error::ApiError;
use crate::extractors::{AdminUser, parse_id};
use crate::state::AppState;

/// GET /api/documents
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DocumentResponse>>>, ApiError> {
    let documents = state.document_service.list_documents().await?;
    Ok(Json(ApiResponse::ok(
        documents.into_iter().map(DocumentResponse::from).collect(),
    )))
}

/// GET /api/groups/{id}/documents
pub async fn list_group_documents(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DocumentResponse>>>, ApiError> {
    let group_id: GroupId = parse_id(&group_id)?;
    let documents = state.document_service.list_group_documents(group_id).await?;
    Ok(Json(ApiResponse::ok(
        documents.into_iter().map(DocumentResponse::from).collect(),
    )))
}

/// POST /api/groups/{id}/documents (multipart, `file` field)
pub async fn upload(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<DocumentResponse>>), ApiError> {
    let group_id: GroupId = parse_id(&group_id)?;

    let mut file: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::validation("The file field has no filename"))?;
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        file = Some((file_name, content_type, data));
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| AppError::validation("Missing 'file' field"))?;

    let document = state
        .document_service
        .upload(UploadRequest {
            group_id,
            file_name,
            content_type,
            data,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(DocumentResponse::from(document))),
    ))
}

/// POST /api/groups/{id}/documents/renumber
pub async fn renumber(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(group_id): Path<String>,
) -> Result<Json<ApiResponse<RenumberResponse<DocumentId>>>, ApiError> {
    let group_id: GroupId = parse_id(&group_id)?;
    let writes = state
        .document_service
        .renumber_documents(&admin, group_id)
        .await?;
    Ok(Json(ApiResponse::ok(RenumberResponse {
        updated: writes.len(),
        writes,
    })))
}

/// GET /api/documents/{id}/download
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: DocumentId = parse_id(&id)?;
    let file = state.document_service.download(id).await?;

    let content_type = HeaderValue::from_str(&file.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&file.file_name))
        .header(header::CONTENT_LENGTH, file.data.len())
        .body(Body::from(file.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// Characters left unescaped in the RFC 5987 `filename*` parameter.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'-').remove(b'_');

/// Attachment header for a stored file name. Names that are not plain
/// printable ASCII get a `_`-substituted `filename` plus an encoded
/// `filename*`.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    if fallback == file_name {
        return format!("attachment; filename=\"{fallback}\"");
    }
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(file_name, FILENAME_ENCODE_SET)
    )
}

/// GET /api/documents/{id}/view
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ViewLink>>, ApiError> {
    let id: DocumentId = parse_id(&id)?;
    let link = state.document_service.view_link(id).await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// POST /api/documents/{id}/move-up
pub async fn move_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MoveResponse<DocumentId>>>, ApiError> {
    move_document(state, &id, MoveDirection::Up).await
}

/// POST /api/documents/{id}/move-down
pub async fn move_down(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MoveResponse<DocumentId>>>, ApiError> {
    move_document(state, &id, MoveDirection::Down).await
}

async fn move_document(
    state: AppState,
    id: &str,
    direction: MoveDirection,
) -> Result<Json<ApiResponse<MoveResponse<DocumentId>>>, ApiError> {
    let id: DocumentId = parse_id(id)?;
    let outcome = state.document_service.move_document(id, direction).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// DELETE /api/documents/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: DocumentId = parse_id(&id)?;
    state.document_service.delete_document(&admin, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Document deleted"))))
}
