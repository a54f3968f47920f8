//! Input validation shared by the services.

use validator::{Validate, ValidationError};

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;
use eduhub_entity::PrincipalProfile;

/// Country code every phone number must carry.
pub const PHONE_PREFIX: &str = "+998";

/// Digits following [`PHONE_PREFIX`].
pub const PHONE_DIGITS: usize = 9;

/// Highest IELTS band.
pub const MAX_IELTS_SCORE: f64 = 9.0;

/// Phone numbers are `+998` followed by exactly nine digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let valid = phone
        .strip_prefix(PHONE_PREFIX)
        .is_some_and(|rest| rest.len() == PHONE_DIGITS && rest.bytes().all(|b| b.is_ascii_digit()));
    if valid {
        return Ok(());
    }
    let mut e = ValidationError::new("phone");
    e.message = Some("Phone must be in the form +998XXXXXXXXX".into());
    Err(e)
}

/// Reject blank-after-trim strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut e = ValidationError::new("blank");
        e.message = Some("Value must not be blank".into());
        return Err(e);
    }
    Ok(())
}

/// Run `validator` derive rules and map failures to a validation error.
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Range checks on the role-specific profile values.
pub fn validate_profile(profile: &PrincipalProfile) -> AppResult<()> {
    if profile.salary.is_some_and(|s| s < 0) {
        return Err(AppError::validation("Salary must not be negative"));
    }
    if let Some(score) = profile.ielts_score {
        if !(0.0..=MAX_IELTS_SCORE).contains(&score) {
            return Err(AppError::validation(format!(
                "IELTS score must be between 0 and {MAX_IELTS_SCORE}"
            )));
        }
    }
    if profile.ielts_attempt_count.is_some_and(|n| n < 0) {
        return Err(AppError::validation(
            "IELTS attempt count must not be negative",
        ));
    }
    if let Some(group) = &profile.group_name {
        validate_not_blank(group)
            .map_err(|_| AppError::validation("Group name must not be blank"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+998901234567").is_ok());

        for phone in [
            "998901234567",
            "+99890123456",
            "+9989012345678",
            "+99890123456a",
            "+997901234567",
            "",
        ] {
            assert!(validate_phone(phone).is_err(), "{phone} should be rejected");
        }
    }

    #[test]
    fn test_validate_profile_ranges() {
        assert!(validate_profile(&PrincipalProfile::default()).is_ok());

        let profile = PrincipalProfile {
            ielts_score: Some(9.5),
            ..Default::default()
        };
        assert!(validate_profile(&profile).is_err());

        let profile = PrincipalProfile {
            salary: Some(-1),
            ..Default::default()
        };
        assert!(validate_profile(&profile).is_err());

        let profile = PrincipalProfile {
            group_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(validate_profile(&profile).is_err());
    }
}
