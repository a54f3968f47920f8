//! Store traits consumed by the auth and service layers.
//!
//! Every store-backed role exposes the same [`PrincipalStore`] contract.
//! Soft-deleted rows are invisible to every read except
//! [`PrincipalStore::get_last_login`], which must see them so that a login
//! is never issued twice.

use async_trait::async_trait;
use uuid::Uuid;

use eduhub_core::result::AppResult;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::branch::{Branch, BranchUpdate, NewBranch};
use eduhub_entity::{NewPrincipal, Principal, PrincipalReport, PrincipalUpdate, Role};

/// Credential and profile store for one role.
#[async_trait]
pub trait PrincipalStore: Send + Sync + 'static {
    /// The role this store serves.
    fn role(&self) -> Role;

    /// Insert a principal under the next login of the role's sequence.
    ///
    /// Computing the login and inserting the row happen atomically with
    /// respect to other creates on the same store.
    async fn create(&self, data: &NewPrincipal) -> AppResult<Principal>;

    /// Find a live principal by id.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Principal>>;

    /// List live principals, optionally filtered by a search term.
    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Principal>>;

    /// Apply a partial update to a live principal.
    async fn update(&self, id: Uuid, data: &PrincipalUpdate) -> AppResult<Option<Principal>>;

    /// Soft-delete a principal. Returns `false` if it was missing or already deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Find a live principal by login. Used by the login flow.
    async fn get_by_login(&self, login: &str) -> AppResult<Option<Principal>>;

    /// The highest login ever issued by this store, soft-deleted rows
    /// included, or the role's seed when the store is empty.
    async fn get_last_login(&self) -> AppResult<String>;

    /// List live principals with their aggregated report totals.
    async fn get_report_list(&self, query: &ListQuery) -> AppResult<PageResponse<PrincipalReport>>;
}

/// Branch store.
#[async_trait]
pub trait BranchStore: Send + Sync + 'static {
    /// Insert a branch.
    async fn create(&self, data: &NewBranch) -> AppResult<Branch>;

    /// Find a live branch by id.
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Branch>>;

    /// List live branches, optionally filtered by name or address.
    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Branch>>;

    /// Apply a partial update to a live branch.
    async fn update(&self, id: Uuid, data: &BranchUpdate) -> AppResult<Option<Branch>>;

    /// Soft-delete a branch.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
