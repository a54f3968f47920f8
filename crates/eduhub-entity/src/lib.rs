//! # eduhub-entity
//!
//! Domain entity models for EduHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod branch;
pub mod principal;
pub mod report;
pub mod role;

pub use branch::Branch;
pub use principal::{NewPrincipal, Principal, PrincipalProfile, PrincipalUpdate};
pub use report::PrincipalReport;
pub use role::Role;
