//! # eduhub-database
//!
//! PostgreSQL connection management, the credential-store traits consumed
//! by the auth and service layers, and their Postgres and in-memory
//! implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod registry;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use registry::PrincipalStores;
pub use store::{BranchStore, PrincipalStore};
