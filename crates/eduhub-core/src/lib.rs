//! # eduhub-core
//!
//! Core crate for EduHub. Contains configuration schemas, pagination and
//! list-query types, the unified error system, and its HTTP mapping.
//!
//! This crate has **no** internal dependencies on other EduHub crates.

pub mod config;
pub mod error;
pub mod http;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
