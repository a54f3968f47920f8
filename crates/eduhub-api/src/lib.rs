//! # eduhub-api
//!
//! HTTP API layer for EduHub built on Axum.
//!
//! Provides the REST endpoints, middleware (request logging, CORS, body
//! limits), extractors and DTOs. Every protected handler
//! states its allowed roles inline and checks them through the
//! authorization gate before calling a service.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
