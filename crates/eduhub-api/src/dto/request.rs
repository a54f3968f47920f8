//! Request DTOs with validation.
//!
//! Principal and branch bodies are the service request types
//! (`eduhub_service::CreatePrincipalRequest` and friends); only the auth
//! bodies live here.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login ID (e.g. `T00017`) or the SuperAdmin login.
    #[validate(length(min = 1, max = 64, message = "Login is required"))]
    pub login: String,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}
