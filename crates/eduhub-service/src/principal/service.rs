//! Principal CRUD and reports: validation, password hashing, and the
//! references a principal carries to branches and support teachers.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use eduhub_auth::password::{PasswordHasher, PasswordValidator};
use eduhub_core::error::AppError;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_database::{BranchStore, PrincipalStores};
use eduhub_entity::{NewPrincipal, Principal, PrincipalProfile, PrincipalReport, PrincipalUpdate, Role};

use crate::context::RequestContext;
use crate::validation::{validate_not_blank, validate_phone, validate_profile, validate_request};

/// Request to create a principal. The login is assigned by the store.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePrincipalRequest {
    /// Full name.
    #[validate(
        length(min = 1, max = 100, message = "Full name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub fullname: String,
    /// Phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    /// Initial plaintext password.
    pub password: String,
    /// Branch the principal belongs to.
    pub branch_id: Option<Uuid>,
    /// Role-specific values.
    #[serde(flatten)]
    pub profile: PrincipalProfile,
}

/// Partial update of a principal.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePrincipalRequest {
    /// New full name.
    #[validate(
        length(min = 1, max = 100, message = "Full name must be 1-100 characters"),
        custom(function = "validate_not_blank")
    )]
    pub fullname: Option<String>,
    /// New phone number.
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New branch.
    pub branch_id: Option<Uuid>,
    /// Role-specific values.
    #[serde(flatten)]
    pub profile: PrincipalProfile,
}

/// Manages principals of every store-backed role.
#[derive(Clone)]
pub struct PrincipalService {
    /// Per-role stores.
    stores: PrincipalStores,
    /// Branch store for reference checks.
    branches: Arc<dyn BranchStore>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    validator: PasswordValidator,
}

impl std::fmt::Debug for PrincipalService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalService")
            .field("stores", &self.stores)
            .field("validator", &self.validator)
            .finish()
    }
}

impl PrincipalService {
    /// Creates a new principal service.
    pub fn new(
        stores: PrincipalStores,
        branches: Arc<dyn BranchStore>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            stores,
            branches,
            hasher: PasswordHasher::new(),
            validator,
        }
    }

    /// Creates a principal of `role`, hashing the password once.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        role: Role,
        req: CreatePrincipalRequest,
    ) -> Result<Principal, AppError> {
        validate_request(&req)?;
        validate_profile(&req.profile)?;
        req.profile.ensure_applicable(role)?;
        self.validator.validate(&req.password)?;
        self.check_references(req.branch_id, &req.profile).await?;

        let store = self.stores.require(role)?;
        let password_hash = self.hasher.hash_password(&req.password)?;
        let principal = store
            .create(&NewPrincipal {
                fullname: req.fullname.trim().to_string(),
                phone: req.phone,
                password_hash,
                branch_id: req.branch_id,
                profile: req.profile,
            })
            .await?;

        info!(
            actor = %ctx.principal_id,
            role = %role,
            principal_id = %principal.id,
            login = %principal.login,
            "Principal created"
        );
        Ok(principal)
    }

    /// Gets a live principal of `role`.
    pub async fn get(&self, role: Role, id: Uuid) -> Result<Principal, AppError> {
        self.stores
            .require(role)?
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{role} not found")))
    }

    /// Lists live principals of `role`.
    pub async fn list(
        &self,
        role: Role,
        query: &ListQuery,
    ) -> Result<PageResponse<Principal>, AppError> {
        self.stores.require(role)?.get_list(query).await
    }

    /// Applies a partial update; a new password is re-hashed once.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        role: Role,
        id: Uuid,
        req: UpdatePrincipalRequest,
    ) -> Result<Principal, AppError> {
        validate_request(&req)?;
        validate_profile(&req.profile)?;
        req.profile.ensure_applicable(role)?;
        if let Some(password) = &req.password {
            self.validator.validate(password)?;
        }
        self.check_references(req.branch_id, &req.profile).await?;

        let store = self.stores.require(role)?;
        let password_hash = req
            .password
            .as_deref()
            .map(|p| self.hasher.hash_password(p))
            .transpose()?;
        let update = PrincipalUpdate {
            fullname: req.fullname.map(|n| n.trim().to_string()),
            phone: req.phone,
            password_hash,
            branch_id: req.branch_id,
            profile: req.profile,
        };

        if update.is_empty() {
            return self.get(role, id).await;
        }

        let principal = store
            .update(id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{role} not found")))?;

        info!(actor = %ctx.principal_id, role = %role, principal_id = %id, "Principal updated");
        Ok(principal)
    }

    /// Soft-deletes a principal. Its login is never reissued.
    pub async fn delete(&self, ctx: &RequestContext, role: Role, id: Uuid) -> Result<(), AppError> {
        if !self.stores.require(role)?.delete(id).await? {
            return Err(AppError::not_found(format!("{role} not found")));
        }
        info!(actor = %ctx.principal_id, role = %role, principal_id = %id, "Principal deleted");
        Ok(())
    }

    /// Lists live principals of `role` with their report totals.
    pub async fn report(
        &self,
        role: Role,
        query: &ListQuery,
    ) -> Result<PageResponse<PrincipalReport>, AppError> {
        self.stores.require(role)?.get_report_list(query).await
    }

    async fn check_references(
        &self,
        branch_id: Option<Uuid>,
        profile: &PrincipalProfile,
    ) -> Result<(), AppError> {
        if let Some(branch_id) = branch_id {
            if self.branches.get_by_id(branch_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Branch {branch_id} does not exist"
                )));
            }
        }
        if let Some(support_id) = profile.support_teacher_id {
            let exists = self
                .stores
                .require(Role::SupportTeacher)?
                .get_by_id(support_id)
                .await?
                .is_some();
            if !exists {
                return Err(AppError::validation(format!(
                    "Support teacher {support_id} does not exist"
                )));
            }
        }
        Ok(())
    }
}
