//! Human-readable, per-role sequential login IDs.
//!
//! A login is the role prefix followed by a zero-padded five digit sequence
//! number, e.g. `A00001`, `ST00042`. The sequence for a role never goes
//! backwards and never reuses a value.

use tracing::error;

use eduhub_core::error::{AppError, ErrorKind};
use eduhub_core::result::AppResult;

use crate::role::Role;

/// Number of digits in the sequence part of a login.
pub const SEQUENCE_DIGITS: usize = 5;

/// Largest sequence number representable in [`SEQUENCE_DIGITS`] digits.
pub const MAX_SEQUENCE: u32 = 99_999;

fn prefix_for(role: Role) -> AppResult<&'static str> {
    role.login_prefix()
        .ok_or_else(|| AppError::internal(format!("Role {role} has no login sequence")))
}

fn format_login(prefix: &str, sequence: u32) -> String {
    format!("{prefix}{sequence:0width$}", width = SEQUENCE_DIGITS)
}

/// The value treated as "last issued" when a role's store is empty.
pub fn seed_login(role: Role) -> AppResult<String> {
    Ok(format_login(prefix_for(role)?, 0))
}

/// Extract the sequence number from a login issued for `role`.
pub fn parse_sequence(role: Role, login: &str) -> AppResult<u32> {
    let prefix = prefix_for(role)?;

    let digits = login
        .strip_prefix(prefix)
        .filter(|rest| rest.len() == SEQUENCE_DIGITS && rest.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| {
            error!(role = %role, login = %login, "Stored login does not match the role's format");
            AppError::internal(format!(
                "Login '{login}' is not a valid {role} login (expected {prefix} followed by {SEQUENCE_DIGITS} digits)"
            ))
        })?;

    digits
        .parse::<u32>()
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to parse login sequence", e))
}

/// Compute the login that follows `last_issued` for `role`.
///
/// Fails with `Internal` when `last_issued` is malformed and with `Conflict`
/// when the role's sequence is exhausted.
pub fn next_login(role: Role, last_issued: &str) -> AppResult<String> {
    let sequence = parse_sequence(role, last_issued)?;

    if sequence >= MAX_SEQUENCE {
        error!(role = %role, last = %last_issued, "Login sequence exhausted");
        return Err(AppError::conflict(format!(
            "Login sequence for {role} is exhausted"
        )));
    }

    Ok(format_login(prefix_for(role)?, sequence + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values() {
        assert_eq!(seed_login(Role::Administration).unwrap(), "A00000");
        assert_eq!(seed_login(Role::Manager).unwrap(), "M00000");
        assert_eq!(seed_login(Role::Teacher).unwrap(), "T00000");
        assert_eq!(seed_login(Role::SupportTeacher).unwrap(), "ST00000");
        assert_eq!(seed_login(Role::Student).unwrap(), "S00000");
        assert!(seed_login(Role::SuperAdmin).is_err());
    }

    #[test]
    fn test_next_login_from_seed() {
        assert_eq!(next_login(Role::Administration, "A00000").unwrap(), "A00001");
        assert_eq!(next_login(Role::SupportTeacher, "ST00009").unwrap(), "ST00010");
        assert_eq!(next_login(Role::Student, "S00099").unwrap(), "S00100");
    }

    #[test]
    fn test_next_login_strictly_increases_and_is_deterministic() {
        for role in Role::STORED {
            let mut last = seed_login(role).unwrap();
            for _ in 0..200 {
                let next = next_login(role, &last).unwrap();
                assert_eq!(next, next_login(role, &last).unwrap());
                assert!(
                    parse_sequence(role, &next).unwrap() > parse_sequence(role, &last).unwrap()
                );
                assert_eq!(next.len(), last.len());
                last = next;
            }
        }
    }

    #[test]
    fn test_malformed_last_login_is_an_error() {
        let err = next_login(Role::Teacher, "T12a45").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);

        let err = next_login(Role::Teacher, "A00001").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);

        let err = next_login(Role::Teacher, "T000001").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_student_prefix_does_not_accept_support_teacher_logins() {
        assert!(next_login(Role::Student, "ST00001").is_err());
    }

    #[test]
    fn test_exhausted_sequence_is_a_conflict() {
        let err = next_login(Role::Manager, "M99999").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
