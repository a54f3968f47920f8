//! In-memory branch store.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use eduhub_core::result::AppResult;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::branch::{Branch, BranchUpdate, NewBranch};

use super::paginate;
use crate::store::BranchStore;

/// Branch store held in process memory.
#[derive(Debug, Default)]
pub struct MemoryBranchStore {
    rows: RwLock<Vec<Branch>>,
}

impl MemoryBranchStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BranchStore for MemoryBranchStore {
    async fn create(&self, data: &NewBranch) -> AppResult<Branch> {
        let now = Utc::now();
        let branch = Branch {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            address: data.address.clone(),
            phone: data.phone.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        self.rows.write().await.push(branch.clone());
        Ok(branch)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|b| b.id == id && !b.is_deleted())
            .cloned())
    }

    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Branch>> {
        let term = query.search_term().map(str::to_lowercase);
        let mut rows: Vec<Branch> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|b| !b.is_deleted())
            .filter(|b| {
                term.as_deref().is_none_or(|t| {
                    b.name.to_lowercase().contains(t) || b.address.to_lowercase().contains(t)
                })
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(paginate(rows, &query.page_request()))
    }

    async fn update(&self, id: Uuid, data: &BranchUpdate) -> AppResult<Option<Branch>> {
        let mut rows = self.rows.write().await;
        let Some(branch) = rows.iter_mut().find(|b| b.id == id && !b.is_deleted()) else {
            return Ok(None);
        };
        if let Some(name) = &data.name {
            branch.name = name.clone();
        }
        if let Some(address) = &data.address {
            branch.address = address.clone();
        }
        if let Some(phone) = &data.phone {
            branch.phone = phone.clone();
        }
        branch.updated_at = Utc::now();
        Ok(Some(branch.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        Ok(match rows.iter_mut().find(|b| b.id == id && !b.is_deleted()) {
            Some(branch) => {
                branch.deleted_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }
}
