//! Principal management for every store-backed role.

pub mod service;

pub use service::{CreatePrincipalRequest, PrincipalService, UpdatePrincipalRequest};
