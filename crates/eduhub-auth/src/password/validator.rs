//! Password policy enforcement for new passwords.

use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;

/// Characters allowed besides ASCII letters and digits.
const ALLOWED_SYMBOLS: &[char] = &['$', '_', '@', '.', '#'];

/// Validates new passwords against the configured policy.
///
/// A password must be within the configured length bounds, use only ASCII
/// letters, digits and `$ _ @ . #`, and contain at least one letter and
/// one digit.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length.max(config.password_min_length),
        }
    }

    /// Returns `Ok(())` if the password meets every rule, or a validation
    /// error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters long",
                self.min_length, self.max_length
            )));
        }

        if let Some(c) = password
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !ALLOWED_SYMBOLS.contains(c))
        {
            return Err(AppError::validation(format!(
                "Password contains an unsupported character '{c}'"
            )));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}
