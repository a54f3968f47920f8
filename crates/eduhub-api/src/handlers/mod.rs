//! HTTP request handlers.

pub mod auth;
pub mod branch;
pub mod health;
pub mod principal;
