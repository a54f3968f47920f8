//! Authentication configuration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Development fallback for the JWT signing secret.
pub const DEFAULT_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Development fallback for the bootstrap SuperAdmin password.
pub const DEFAULT_SUPER_ADMIN_PASSWORD: &str = "SuperAdmin_1";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub jwt_refresh_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// The bootstrap SuperAdmin principal.
    #[serde(default)]
    pub super_admin: SuperAdminConfig,
}

impl AuthConfig {
    /// Whether the signing secret is still the development fallback.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            jwt_refresh_ttl_hours: default_refresh_ttl(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            super_admin: SuperAdminConfig::default(),
        }
    }
}

/// Credentials of the configuration-defined SuperAdmin.
///
/// The SuperAdmin is never persisted. Its `id` is the only identity allowed
/// to create managers.
#[derive(Clone, Serialize, Deserialize)]
pub struct SuperAdminConfig {
    /// Fixed principal id carried in SuperAdmin tokens.
    #[serde(default = "default_super_admin_id")]
    pub id: Uuid,
    /// Login name.
    #[serde(default = "default_super_admin_login")]
    pub login: String,
    /// Plaintext password, compared in constant time.
    #[serde(default = "default_super_admin_password")]
    pub password: String,
}

impl SuperAdminConfig {
    /// Whether the password is still the development fallback.
    pub fn uses_default_password(&self) -> bool {
        self.password == DEFAULT_SUPER_ADMIN_PASSWORD
    }
}

impl Default for SuperAdminConfig {
    fn default() -> Self {
        Self {
            id: default_super_admin_id(),
            login: default_super_admin_login(),
            password: default_super_admin_password(),
        }
    }
}

impl std::fmt::Debug for SuperAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperAdminConfig")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("password", &"****")
            .finish()
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    24
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    30
}

fn default_super_admin_id() -> Uuid {
    Uuid::from_u128(0xe924cb31_e068_4062_a3b9_66790722e68a)
}

fn default_super_admin_login() -> String {
    "SuperAdmin".to_string()
}

fn default_super_admin_password() -> String {
    DEFAULT_SUPER_ADMIN_PASSWORD.to_string()
}
