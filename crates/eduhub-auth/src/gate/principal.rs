//! The caller identity recovered from a verified access token.

use serde::Serialize;
use uuid::Uuid;

use eduhub_core::error::AppError;
use eduhub_entity::Role;

use crate::jwt::Claims;

/// Identity and role of a verified caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    /// Principal id (token subject).
    pub id: Uuid,
    /// Role carried by the token.
    pub role: Role,
}

impl AuthenticatedPrincipal {
    /// Build from decoded access-token claims.
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }

    /// Succeeds iff the caller's role is in `allowed`.
    pub fn authorize(&self, allowed: &[Role]) -> Result<Self, AppError> {
        if allowed.contains(&self.role) {
            return Ok(*self);
        }

        let required = allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(
            principal_id = %self.id,
            role = %self.role,
            required = %required,
            "Role not permitted"
        );
        Err(AppError::unauthorized(format!(
            "Role '{}' is not permitted; required one of: {required}",
            self.role
        )))
    }

    /// Succeeds only for the bootstrap SuperAdmin: role SuperAdmin and the
    /// configured bootstrap id.
    pub fn require_bootstrap(&self, bootstrap_id: Uuid) -> Result<Self, AppError> {
        self.authorize(&[Role::SuperAdmin])?;
        if self.id != bootstrap_id {
            tracing::warn!(principal_id = %self.id, "SuperAdmin token does not carry the bootstrap id");
            return Err(AppError::unauthorized(
                "Only the bootstrap SuperAdmin may perform this action",
            ));
        }
        Ok(*self)
    }
}
