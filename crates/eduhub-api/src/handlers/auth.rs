//! Auth handlers: per-role login, refresh, me.

use axum::Json;
use axum::extract::{Path, State};

use eduhub_auth::{AuthenticatedPrincipal, TokenPair};
use eduhub_core::error::AppError;
use eduhub_entity::Role;
use eduhub_service::validation::validate_request;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/auth/{role}/login
pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    let role: Role = role
        .parse()
        .map_err(|_| AppError::not_found(format!("Unknown role '{role}'")))?;
    validate_request(&req)?;

    let tokens = state
        .login_service
        .login(role, &req.login, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, AppError> {
    validate_request(&req)?;
    let tokens = state.login_service.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Result<Json<ApiResponse<AuthenticatedPrincipal>>, AppError> {
    let caller = auth.authorize(&Role::ALL)?;
    Ok(Json(ApiResponse::ok(caller)))
}
