//! Principal resource handlers, shared by every store-backed role.
//!
//! Each resource carries its own allow-lists in a [`PrincipalResource`];
//! the router binds one resource per path prefix.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use eduhub_core::error::AppError;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::{Principal, PrincipalReport, Role};
use eduhub_service::{CreatePrincipalRequest, RequestContext, UpdatePrincipalRequest};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, DeferredJson, parse_uuid};
use crate::state::AppState;

use eduhub_entity::Role::{Administration, Manager, Student, SuperAdmin};

/// Who may create principals of a resource.
#[derive(Debug, Clone, Copy)]
pub enum CreateAccess {
    /// Any of these roles.
    Roles(&'static [Role]),
    /// Only the configured bootstrap SuperAdmin.
    Bootstrap,
}

/// Role and allow-lists of one principal resource.
#[derive(Debug, Clone, Copy)]
pub struct PrincipalResource {
    /// The role whose store backs the resource.
    pub role: Role,
    /// Create.
    pub create: CreateAccess,
    /// Get and list.
    pub read: &'static [Role],
    /// Update and delete.
    pub write: &'static [Role],
    /// Report list; `None` when the resource has no report.
    pub report: Option<&'static [Role]>,
}

/// `/administrations`
pub const ADMINISTRATIONS: PrincipalResource = PrincipalResource {
    role: Role::Administration,
    create: CreateAccess::Roles(&[SuperAdmin, Manager]),
    read: &[SuperAdmin, Manager],
    write: &[SuperAdmin, Manager],
    report: Some(&[SuperAdmin, Manager]),
};

/// `/managers`
pub const MANAGERS: PrincipalResource = PrincipalResource {
    role: Role::Manager,
    create: CreateAccess::Bootstrap,
    read: &[SuperAdmin, Manager],
    write: &[SuperAdmin],
    report: None,
};

/// `/teachers`
pub const TEACHERS: PrincipalResource = PrincipalResource {
    role: Role::Teacher,
    create: CreateAccess::Roles(&[SuperAdmin, Manager]),
    read: &[SuperAdmin, Manager],
    write: &[SuperAdmin, Manager],
    report: Some(&[SuperAdmin]),
};

/// `/support-teachers`
pub const SUPPORT_TEACHERS: PrincipalResource = PrincipalResource {
    role: Role::SupportTeacher,
    create: CreateAccess::Roles(&[SuperAdmin, Manager]),
    read: &[SuperAdmin, Manager],
    write: &[SuperAdmin, Manager],
    report: Some(&[SuperAdmin, Manager]),
};

/// `/students`
pub const STUDENTS: PrincipalResource = PrincipalResource {
    role: Role::Student,
    create: CreateAccess::Roles(&[SuperAdmin, Manager, Administration]),
    read: &[SuperAdmin, Manager, Administration],
    write: &[SuperAdmin, Manager, Administration],
    report: Some(&[SuperAdmin]),
};

impl PrincipalResource {
    fn authorize_create(&self, auth: &AuthUser, state: &AppState) -> Result<RequestContext, AppError> {
        match self.create {
            CreateAccess::Roles(allowed) => auth.require(allowed),
            CreateAccess::Bootstrap => auth.require_bootstrap(state.bootstrap_id()),
        }
    }
}

/// POST /api/{resource}
pub async fn create(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    body: DeferredJson<CreatePrincipalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Principal>>), AppError> {
    let ctx = resource.authorize_create(&auth, &state)?;
    let req = body.parse()?;
    let principal = state
        .principal_service
        .create(&ctx, resource.role, req)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(principal))))
}

/// GET /api/{resource}
pub async fn list(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    query: ListQuery,
) -> Result<Json<ApiResponse<PageResponse<Principal>>>, AppError> {
    auth.require(resource.read)?;
    let page = state.principal_service.list(resource.role, &query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/{resource}/report
pub async fn report(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    query: ListQuery,
) -> Result<Json<ApiResponse<PageResponse<PrincipalReport>>>, AppError> {
    let allowed = resource
        .report
        .ok_or_else(|| AppError::not_found(format!("{} has no report", resource.role)))?;
    auth.require(allowed)?;
    let page = state.principal_service.report(resource.role, &query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/{resource}/{id}
pub async fn get(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    id: String,
) -> Result<Json<ApiResponse<Principal>>, AppError> {
    auth.require(resource.read)?;
    let id = parse_uuid(&id)?;
    let principal = state.principal_service.get(resource.role, id).await?;
    Ok(Json(ApiResponse::ok(principal)))
}

/// PUT /api/{resource}/{id}
pub async fn update(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    id: String,
    body: DeferredJson<UpdatePrincipalRequest>,
) -> Result<Json<ApiResponse<Principal>>, AppError> {
    let ctx = auth.require(resource.write)?;
    let id = parse_uuid(&id)?;
    let req = body.parse()?;
    let principal = state
        .principal_service
        .update(&ctx, resource.role, id, req)
        .await?;
    Ok(Json(ApiResponse::ok(principal)))
}

/// DELETE /api/{resource}/{id}
pub async fn delete(
    resource: PrincipalResource,
    state: AppState,
    auth: AuthUser,
    id: String,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    let ctx = auth.require(resource.write)?;
    let id = parse_uuid(&id)?;
    state
        .principal_service
        .delete(&ctx, resource.role, id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "{} deleted",
        resource.role
    )))))
}

/// GET /api/students/me
pub async fn student_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Principal>>, AppError> {
    let ctx = auth.require(&[Student])?;
    let principal = state
        .principal_service
        .get(Role::Student, ctx.principal_id)
        .await?;
    Ok(Json(ApiResponse::ok(principal)))
}

