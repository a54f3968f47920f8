//! In-process store implementations.
//!
//! They uphold the same contracts as the Postgres repositories and back the
//! unit and HTTP tests of the upper crates.

pub mod branch;
pub mod principal;

pub use branch::MemoryBranchStore;
pub use principal::MemoryPrincipalStore;

use eduhub_core::types::{PageRequest, PageResponse};
use serde::Serialize;

fn paginate<T: Serialize + Clone>(rows: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = rows.len() as u64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(items, page.page, page.page_size, total)
}
