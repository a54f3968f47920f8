//! Principal role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use eduhub_core::AppError;

/// The closed set of roles a token can carry.
///
/// Every role except [`Role::SuperAdmin`] is backed by its own principal
/// table and issues logins from its own sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Configuration-defined bootstrap administrator. Never persisted.
    SuperAdmin,
    /// Branch manager.
    Manager,
    /// Front-office administration staff.
    Administration,
    /// Teacher.
    Teacher,
    /// Assistant to a teacher.
    SupportTeacher,
    /// Student.
    Student,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 6] = [
        Self::SuperAdmin,
        Self::Manager,
        Self::Administration,
        Self::Teacher,
        Self::SupportTeacher,
        Self::Student,
    ];

    /// Roles that are persisted in a principal store.
    pub const STORED: [Role; 5] = [
        Self::Manager,
        Self::Administration,
        Self::Teacher,
        Self::SupportTeacher,
        Self::Student,
    ];

    /// Return the role name as carried in tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "SuperAdmin",
            Self::Manager => "Manager",
            Self::Administration => "Administration",
            Self::Teacher => "Teacher",
            Self::SupportTeacher => "SupportTeacher",
            Self::Student => "Student",
        }
    }

    /// Return the kebab-case form used in URL paths.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super-admin",
            Self::Manager => "manager",
            Self::Administration => "administration",
            Self::Teacher => "teacher",
            Self::SupportTeacher => "support-teacher",
            Self::Student => "student",
        }
    }

    /// Login-ID prefix for store-backed roles.
    pub fn login_prefix(&self) -> Option<&'static str> {
        match self {
            Self::SuperAdmin => None,
            Self::Manager => Some("M"),
            Self::Administration => Some("A"),
            Self::Teacher => Some("T"),
            Self::SupportTeacher => Some("ST"),
            Self::Student => Some("S"),
        }
    }

    /// Backing table for store-backed roles.
    pub fn table_name(&self) -> Option<&'static str> {
        match self {
            Self::SuperAdmin => None,
            Self::Manager => Some("manager"),
            Self::Administration => Some("administration"),
            Self::Teacher => Some("teacher"),
            Self::SupportTeacher => Some("support_teacher"),
            Self::Student => Some("student"),
        }
    }

    /// Whether principals of this role live in a store.
    pub fn is_stored(&self) -> bool {
        !matches!(self, Self::SuperAdmin)
    }

    /// Whether the role is paid a salary (staff) rather than paying fees.
    pub fn is_staff(&self) -> bool {
        matches!(
            self,
            Self::Manager | Self::Administration | Self::Teacher | Self::SupportTeacher
        )
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    /// Accepts the token name (`SupportTeacher`) or the URL slug (`support-teacher`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.slug() == s)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid role: '{s}'. Expected one of: {}",
                    Self::ALL.map(|r| r.as_str()).join(", ")
                ))
            })
    }
}
