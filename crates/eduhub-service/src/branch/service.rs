//! Branch CRUD.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use eduhub_core::error::AppError;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_database::BranchStore;
use eduhub_entity::branch::{Branch, BranchUpdate, NewBranch};

use crate::context::RequestContext;
use crate::validation::{validate_not_blank, validate_phone, validate_request};

/// Request to create a branch.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBranchRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    /// Street address.
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub address: String,
    /// Contact phone.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

/// Partial update of a branch.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBranchRequest {
    /// New name.
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    /// New address.
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub address: Option<String>,
    /// New phone.
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
}

/// Manages branches.
#[derive(Clone)]
pub struct BranchService {
    branches: Arc<dyn BranchStore>,
}

impl std::fmt::Debug for BranchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchService").finish_non_exhaustive()
    }
}

impl BranchService {
    /// Creates a new branch service.
    pub fn new(branches: Arc<dyn BranchStore>) -> Self {
        Self { branches }
    }

    /// Creates a branch.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateBranchRequest,
    ) -> Result<Branch, AppError> {
        validate_request(&req)?;
        let branch = self
            .branches
            .create(&NewBranch {
                name: req.name.trim().to_string(),
                address: req.address.trim().to_string(),
                phone: req.phone,
            })
            .await?;
        info!(actor = %ctx.principal_id, branch_id = %branch.id, name = %branch.name, "Branch created");
        Ok(branch)
    }

    /// Gets a live branch.
    pub async fn get(&self, id: Uuid) -> Result<Branch, AppError> {
        self.branches
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Branch not found"))
    }

    /// Lists live branches.
    pub async fn list(&self, query: &ListQuery) -> Result<PageResponse<Branch>, AppError> {
        self.branches.get_list(query).await
    }

    /// Applies a partial update.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateBranchRequest,
    ) -> Result<Branch, AppError> {
        validate_request(&req)?;
        let update = BranchUpdate {
            name: req.name.map(|n| n.trim().to_string()),
            address: req.address.map(|a| a.trim().to_string()),
            phone: req.phone,
        };
        let branch = self
            .branches
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found("Branch not found"))?;
        info!(actor = %ctx.principal_id, branch_id = %id, "Branch updated");
        Ok(branch)
    }

    /// Soft-deletes a branch.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.branches.delete(id).await? {
            return Err(AppError::not_found("Branch not found"));
        }
        info!(actor = %ctx.principal_id, branch_id = %id, "Branch deleted");
        Ok(())
    }
}
