//! Per-role credential login and token refresh.

pub mod service;

pub use service::LoginService;
