//! Query parameters shared by every list and report endpoint.

use serde::{Deserialize, Serialize};

use super::pagination::PageRequest;

/// Paging plus an optional free-text search term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<u64>,
    /// Number of items per page.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Case-insensitive match against full name, login, or phone.
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    /// Resolve the paging parameters with defaults applied.
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.limit.unwrap_or(defaults.page_size),
        )
    }

    /// The trimmed search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
