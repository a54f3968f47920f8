//! Branch management.

pub mod service;

pub use service::{BranchService, CreateBranchRequest, UpdateBranchRequest};
