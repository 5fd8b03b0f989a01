//! Group handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use docshelf_core::ordering::MoveDirection;
use docshelf_core::types::GroupId;
use docshelf_entity::group::Group;

use crate::dto::request::{CreateGroupRequest, validate_request};
use crate::dto::response::{ApiResponse, MessageResponse, MoveResponse, RenumberResponse};
use crate::error::ApiError;
use crate::extractors::{AdminUser, parse_id};
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Group>>>, ApiError> {
    let groups = state.group_service.list_groups().await?;
    Ok(Json(ApiResponse::ok(groups)))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Group>>), ApiError> {
    validate_request(&req)?;
    let group = state.group_service.create_group(&req.name).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(group))))
}

/// POST /api/groups/{id}/move-up
pub async fn move_up(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MoveResponse<GroupId>>>, ApiError> {
    move_group(state, &id, MoveDirection::Up).await
}

/// POST /api/groups/{id}/move-down
pub async fn move_down(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MoveResponse<GroupId>>>, ApiError> {
    move_group(state, &id, MoveDirection::Down).await
}

async fn move_group(
    state: AppState,
    id: &str,
    direction: MoveDirection,
) -> Result<Json<ApiResponse<MoveResponse<GroupId>>>, ApiError> {
    let id: GroupId = parse_id(id)?;
    let outcome = state.group_service.move_group(id, direction).await?;
    Ok(Json(ApiResponse::ok(outcome.into())))
}

/// POST /api/groups/renumber
pub async fn renumber(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<ApiResponse<RenumberResponse<GroupId>>>, ApiError> {
    let writes = state.group_service.renumber_groups(&admin).await?;
    Ok(Json(ApiResponse::ok(RenumberResponse {
        updated: writes.len(),
        writes,
    })))
}

/// DELETE /api/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id: GroupId = parse_id(&id)?;
    state.group_service.delete_group(&admin, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Group deleted"))))
}
