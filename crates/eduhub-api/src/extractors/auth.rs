//! `AuthUser` extractor: pulls the bearer token from the Authorization
//! header and verifies it through the authorization gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use uuid::Uuid;

use eduhub_auth::AuthenticatedPrincipal;
use eduhub_core::error::AppError;
use eduhub_entity::Role;
use eduhub_service::RequestContext;

use crate::state::AppState;

/// A caller whose access token verified. No role check has run yet.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub AuthenticatedPrincipal);

impl AuthUser {
    /// Require the caller's role to be in `allowed`.
    pub fn require(&self, allowed: &[Role]) -> Result<RequestContext, AppError> {
        self.0.authorize(allowed).map(RequestContext::new)
    }

    /// Require the caller to be the bootstrap SuperAdmin.
    pub fn require_bootstrap(&self, bootstrap_id: Uuid) -> Result<RequestContext, AppError> {
        self.0.require_bootstrap(bootstrap_id).map(RequestContext::new)
    }
}

impl std::ops::Deref for AuthUser {
    type Target = AuthenticatedPrincipal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::token_invalid("Missing or malformed Authorization header"))?;

        let principal = state.gate.authenticate(bearer.token())?;
        Ok(AuthUser(principal))
    }
}
