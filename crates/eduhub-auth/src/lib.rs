//! # eduhub-auth
//!
//! Authentication and authorization for EduHub.
//!
//! ## Modules
//!
//! - `jwt`: role-tagged token issuing and validation
//! - `password`: Argon2id password hashing and policy enforcement
//! - `gate`: the single allow-list check applied by every handler
//! - `login`: per-role credential verification, SuperAdmin bootstrap, refresh

pub mod gate;
pub mod jwt;
pub mod login;
pub mod password;

pub use gate::{AuthenticatedPrincipal, AuthorizationGate};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use login::LoginService;
pub use password::{PasswordHasher, PasswordValidator};
