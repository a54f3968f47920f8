//! Principal entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;

use crate::role::Role;

/// A store-backed principal: any Manager, Administration, Teacher,
/// SupportTeacher, or Student row.
///
/// Role-specific profile columns are optional so the same row type can be
/// read from every principal table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Principal {
    /// Unique principal identifier.
    pub id: Uuid,
    /// Generated login ID (e.g. `T00017`).
    pub login: String,
    /// Full name.
    pub fullname: String,
    /// Phone number in `+998XXXXXXXXX` form.
    pub phone: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Branch the principal belongs to.
    pub branch_id: Option<Uuid>,
    /// Monthly salary (staff roles).
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    /// IELTS band score.
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ielts_score: Option<f64>,
    /// Number of IELTS attempts.
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ielts_attempt_count: Option<i32>,
    /// Assigned support teacher (teachers only).
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_teacher_id: Option<Uuid>,
    /// Group the student attends (students only).
    #[sqlx(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// When the principal was created.
    pub created_at: DateTime<Utc>,
    /// When the principal was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Principal {
    /// Check if the principal has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Case-insensitive match against login, full name, or phone.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.login.as_str()),
            Some(self.fullname.as_str()),
            Some(self.phone.as_str()),
            self.group_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|value| value.to_lowercase().contains(&term))
    }
}

/// Role-specific profile columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    /// `salary`
    Salary,
    /// `ielts_score`
    IeltsScore,
    /// `ielts_attempt_count`
    IeltsAttemptCount,
    /// `support_teacher_id`
    SupportTeacherId,
    /// `group_name`
    GroupName,
}

impl ProfileField {
    /// Column name in the principal tables.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::IeltsScore => "ielts_score",
            Self::IeltsAttemptCount => "ielts_attempt_count",
            Self::SupportTeacherId => "support_teacher_id",
            Self::GroupName => "group_name",
        }
    }

    /// Profile columns carried by a role's table.
    pub fn for_role(role: Role) -> &'static [ProfileField] {
        match role {
            Role::SuperAdmin => &[],
            Role::Manager => &[Self::Salary],
            Role::Administration => &[Self::Salary, Self::IeltsScore],
            Role::Teacher => &[
                Self::Salary,
                Self::IeltsScore,
                Self::IeltsAttemptCount,
                Self::SupportTeacherId,
            ],
            Role::SupportTeacher => &[Self::Salary, Self::IeltsScore, Self::IeltsAttemptCount],
            Role::Student => &[Self::GroupName],
        }
    }
}

/// Optional role-specific values supplied on create or update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrincipalProfile {
    /// Monthly salary.
    pub salary: Option<i64>,
    /// IELTS band score.
    pub ielts_score: Option<f64>,
    /// Number of IELTS attempts.
    pub ielts_attempt_count: Option<i32>,
    /// Assigned support teacher.
    pub support_teacher_id: Option<Uuid>,
    /// Student group.
    pub group_name: Option<String>,
}

impl PrincipalProfile {
    /// Fields that carry a value.
    pub fn present_fields(&self) -> Vec<ProfileField> {
        let mut fields = Vec::new();
        if self.salary.is_some() {
            fields.push(ProfileField::Salary);
        }
        if self.ielts_score.is_some() {
            fields.push(ProfileField::IeltsScore);
        }
        if self.ielts_attempt_count.is_some() {
            fields.push(ProfileField::IeltsAttemptCount);
        }
        if self.support_teacher_id.is_some() {
            fields.push(ProfileField::SupportTeacherId);
        }
        if self.group_name.is_some() {
            fields.push(ProfileField::GroupName);
        }
        fields
    }

    /// Reject values for columns the role's table does not have.
    pub fn ensure_applicable(&self, role: Role) -> AppResult<()> {
        let allowed = ProfileField::for_role(role);
        match self
            .present_fields()
            .into_iter()
            .find(|field| !allowed.contains(field))
        {
            Some(field) => Err(AppError::validation(format!(
                "Field '{}' does not apply to {role}",
                field.column()
            ))),
            None => Ok(()),
        }
    }

    /// Copy the present values onto a principal.
    pub fn apply_to(&self, principal: &mut Principal) {
        if let Some(v) = self.salary {
            principal.salary = Some(v);
        }
        if let Some(v) = self.ielts_score {
            principal.ielts_score = Some(v);
        }
        if let Some(v) = self.ielts_attempt_count {
            principal.ielts_attempt_count = Some(v);
        }
        if let Some(v) = self.support_teacher_id {
            principal.support_teacher_id = Some(v);
        }
        if let Some(v) = &self.group_name {
            principal.group_name = Some(v.clone());
        }
    }
}

/// Data required to create a new principal. The login is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrincipal {
    /// Full name.
    pub fullname: String,
    /// Phone number.
    pub phone: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Branch.
    pub branch_id: Option<Uuid>,
    /// Role-specific values.
    #[serde(default)]
    pub profile: PrincipalProfile,
}

/// Partial update of a principal. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrincipalUpdate {
    /// New full name.
    pub fullname: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New branch.
    pub branch_id: Option<Uuid>,
    /// Role-specific values.
    #[serde(default)]
    pub profile: PrincipalProfile,
}

impl PrincipalUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.fullname.is_none()
            && self.phone.is_none()
            && self.password_hash.is_none()
            && self.branch_id.is_none()
            && self.profile.present_fields().is_empty()
    }
}
