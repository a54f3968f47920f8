//! Route definitions for the EduHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::{DefaultBodyLimit, Path, Query, State},
    middleware as axum_middleware,
    routing::{get, post},
};

use eduhub_core::types::ListQuery;
use eduhub_service::{CreatePrincipalRequest, UpdatePrincipalRequest};

use crate::extractors::{AuthUser, DeferredJson};
use crate::handlers::principal::{self, PrincipalResource};
use crate::handlers::{auth, branch, health};
use crate::middleware;
use crate::state::AppState;

/// Build the Axum router with all routes, the body limit, and request
/// logging.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(health_routes())
        .nest("/branches", branch_routes())
        .nest("/administrations", principal_routes(principal::ADMINISTRATIONS))
        .nest("/managers", principal_routes(principal::MANAGERS))
        .nest("/teachers", principal_routes(principal::TEACHERS))
        .nest("/support-teachers", principal_routes(principal::SUPPORT_TEACHERS))
        .nest(
            "/students",
            principal_routes(principal::STUDENTS).route("/me", get(principal::student_me)),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(axum_middleware::from_fn(middleware::request_logging))
        .with_state(state)
}

/// Auth endpoints: per-role login, refresh, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/{role}/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/me", get(auth::me))
}

/// Health endpoints (no auth)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/detailed", get(health::health_detailed))
}

/// Branch CRUD
fn branch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(branch::create_branch).get(branch::list_branches),
        )
        .route(
            "/{id}",
            get(branch::get_branch)
                .put(branch::update_branch)
                .delete(branch::delete_branch),
        )
}

/// CRUD and report routes for one principal resource.
fn principal_routes(resource: PrincipalResource) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(
                move |State(state): State<AppState>,
                      auth: AuthUser,
                      body: DeferredJson<CreatePrincipalRequest>| {
                    principal::create(resource, state, auth, body)
                },
            )
            .get(
                move |State(state): State<AppState>,
                      auth: AuthUser,
                      Query(query): Query<ListQuery>| {
                    principal::list(resource, state, auth, query)
                },
            ),
        )
        .route(
            "/{id}",
            get(
                move |State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>| {
                    principal::get(resource, state, auth, id)
                },
            )
            .put(
                move |State(state): State<AppState>,
                      auth: AuthUser,
                      Path(id): Path<String>,
                      body: DeferredJson<UpdatePrincipalRequest>| {
                    principal::update(resource, state, auth, id, body)
                },
            )
            .delete(
                move |State(state): State<AppState>, auth: AuthUser, Path(id): Path<String>| {
                    principal::delete(resource, state, auth, id)
                },
            ),
        )
        .route(
            "/report",
            get(
                move |State(state): State<AppState>,
                      auth: AuthUser,
                      Query(query): Query<ListQuery>| {
                    principal::report(resource, state, auth, query)
                },
            ),
        )
}
