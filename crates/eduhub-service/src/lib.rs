//! # eduhub-service
//!
//! Business logic service layer for EduHub. Services validate input,
//! hash passwords, and delegate persistence to the per-role stores.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time.

pub mod branch;
pub mod context;
pub mod principal;
pub mod validation;

pub use branch::{BranchService, CreateBranchRequest, UpdateBranchRequest};
pub use context::RequestContext;
pub use principal::{CreatePrincipalRequest, PrincipalService, UpdatePrincipalRequest};
