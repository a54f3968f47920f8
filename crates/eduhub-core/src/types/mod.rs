//! Core type definitions used across the EduHub workspace.

pub mod pagination;
pub mod query;

pub use pagination::{PageRequest, PageResponse};
pub use query::ListQuery;
