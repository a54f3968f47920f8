//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use eduhub_auth::AuthenticatedPrincipal;
use eduhub_entity::Role;

/// Context for the current authenticated request.
///
/// Built by the API layer after the authorization gate has accepted the
/// caller, and passed into mutating service methods so every write is
/// attributed.
#[derive(Debug, Clone, Serialize)]
pub struct RequestContext {
    /// The caller's principal id.
    pub principal_id: Uuid,
    /// The caller's role at the time the token was issued.
    pub role: Role,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for an authenticated caller.
    pub fn new(caller: AuthenticatedPrincipal) -> Self {
        Self {
            principal_id: caller.id,
            role: caller.role,
            request_time: Utc::now(),
        }
    }
}

impl From<AuthenticatedPrincipal> for RequestContext {
    fn from(caller: AuthenticatedPrincipal) -> Self {
        Self::new(caller)
    }
}
