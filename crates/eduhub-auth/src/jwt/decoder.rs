//! JWT token validation.

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use eduhub_core::config::AuthConfig;
use eduhub_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Clock skew tolerated when checking `exp`, in seconds.
const LEEWAY_SECONDS: u64 = 5;

/// Validates JWT signature, expiry, and token type.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = LEEWAY_SECONDS;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AppError::token_invalid("Token has expired"),
                JwtErrorKind::InvalidSignature => {
                    AppError::token_invalid("Invalid token signature")
                }
                JwtErrorKind::InvalidToken | JwtErrorKind::Base64(_) | JwtErrorKind::Json(_) => {
                    AppError::token_invalid("Invalid token format")
                }
                _ => AppError::token_invalid(format!("Token validation failed: {e}")),
            })?
            .claims;

        if claims.token_type != expected {
            let expected = match expected {
                TokenType::Access => "access",
                TokenType::Refresh => "refresh",
            };
            return Err(AppError::token_invalid(format!(
                "Invalid token type: expected {expected} token"
            )));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::encoder::JwtEncoder;
    use eduhub_core::error::ErrorKind;
    use eduhub_entity::Role;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_trip_preserves_identity_and_role() {
        let cfg = config("unit-test-secret");
        let id = Uuid::new_v4();
        let pair = JwtEncoder::new(&cfg)
            .issue_token_pair(id, Role::Teacher)
            .unwrap();

        let claims = JwtDecoder::new(&cfg)
            .decode_access_token(&pair.access_token)
            .unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Teacher);
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let pair = JwtEncoder::new(&config("issuer-secret"))
            .issue_token_pair(Uuid::new_v4(), Role::Manager)
            .unwrap();
        let err = JwtDecoder::new(&config("other-secret"))
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[test]
    fn test_token_type_is_enforced() {
        let cfg = config("unit-test-secret");
        let pair = JwtEncoder::new(&cfg)
            .issue_token_pair(Uuid::new_v4(), Role::Student)
            .unwrap();
        let decoder = JwtDecoder::new(&cfg);

        assert!(decoder.decode_access_token(&pair.refresh_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.access_token).is_err());
        assert!(decoder.decode_refresh_token(&pair.refresh_token).is_ok());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let cfg = config("unit-test-secret");
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::Administration,
            iat: now - 3600,
            exp: now - 600,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();

        let err = JwtDecoder::new(&cfg).decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
        assert!(err.message.contains("expired"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&config("s"))
            .decode_access_token("not-a-jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }
}
