//! Branch handlers. Branches are managed by the SuperAdmin only.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use eduhub_core::error::AppError;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::Role;
use eduhub_entity::branch::Branch;
use eduhub_service::{CreateBranchRequest, UpdateBranchRequest};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, DeferredJson, parse_uuid};
use crate::state::AppState;

const BRANCH_ADMINS: &[Role] = &[Role::SuperAdmin];

/// POST /api/branches
pub async fn create_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    body: DeferredJson<CreateBranchRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Branch>>), AppError> {
    let ctx = auth.require(BRANCH_ADMINS)?;
    let req = body.parse()?;
    let branch = state.branch_service.create(&ctx, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(branch))))
}

/// GET /api/branches
pub async fn list_branches(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PageResponse<Branch>>>, AppError> {
    auth.require(BRANCH_ADMINS)?;
    let page = state.branch_service.list(&query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/branches/{id}
pub async fn get_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Branch>>, AppError> {
    auth.require(BRANCH_ADMINS)?;
    let branch = state.branch_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(branch)))
}

/// PUT /api/branches/{id}
pub async fn update_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    body: DeferredJson<UpdateBranchRequest>,
) -> Result<Json<ApiResponse<Branch>>, AppError> {
    let ctx = auth.require(BRANCH_ADMINS)?;
    let id = parse_uuid(&id)?;
    let req = body.parse()?;
    let branch = state.branch_service.update(&ctx, id, req).await?;
    Ok(Json(ApiResponse::ok(branch)))
}

/// DELETE /api/branches/{id}
pub async fn delete_branch(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let ctx = auth.require(BRANCH_ADMINS)?;
    state.branch_service.delete(&ctx, parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Branch deleted"))))
}
