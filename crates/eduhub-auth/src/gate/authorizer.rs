//! Token-to-principal authorization entry point.

use std::sync::Arc;

use eduhub_core::error::AppError;
use eduhub_entity::Role;

use super::principal::AuthenticatedPrincipal;
use crate::jwt::JwtDecoder;

/// Verifies bearer tokens and checks them against an allow-list.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    decoder: Arc<JwtDecoder>,
}

impl AuthorizationGate {
    /// Creates a gate that verifies tokens with `decoder`.
    pub fn new(decoder: Arc<JwtDecoder>) -> Self {
        Self { decoder }
    }

    /// Verify an access token and recover the caller. No role check.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedPrincipal, AppError> {
        let claims = self.decoder.decode_access_token(token)?;
        Ok(AuthenticatedPrincipal::from_claims(&claims))
    }

    /// Verify an access token and require its role to be in `allowed`.
    ///
    /// Fails with `TokenInvalid` for a bad token and `Unauthorized` for a
    /// valid token whose role is not allowed.
    pub fn authorize(
        &self,
        token: &str,
        allowed: &[Role],
    ) -> Result<AuthenticatedPrincipal, AppError> {
        self.authenticate(token)?.authorize(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;
    use eduhub_core::config::AuthConfig;
    use eduhub_core::error::ErrorKind;
    use uuid::Uuid;

    fn setup() -> (JwtEncoder, AuthorizationGate) {
        let config = AuthConfig::default();
        (
            JwtEncoder::new(&config),
            AuthorizationGate::new(Arc::new(JwtDecoder::new(&config))),
        )
    }

    #[test]
    fn test_authorize_checks_token_then_role() {
        let (encoder, gate) = setup();
        let id = Uuid::new_v4();
        let pair = encoder.issue_token_pair(id, Role::Teacher).unwrap();

        let err = gate
            .authorize(&pair.access_token, &[Role::SuperAdmin, Role::Manager])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let caller = gate
            .authorize(&pair.access_token, &[Role::Manager, Role::Teacher])
            .unwrap();
        assert_eq!(caller.id, id);
        assert_eq!(caller.role, Role::Teacher);
    }

    #[test]
    fn test_invalid_token_is_token_invalid_not_unauthorized() {
        let (_, gate) = setup();
        let err = gate.authorize("garbage", &Role::ALL).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[test]
    fn test_refresh_token_cannot_authorize() {
        let (encoder, gate) = setup();
        let pair = encoder
            .issue_token_pair(Uuid::new_v4(), Role::SuperAdmin)
            .unwrap();
        let err = gate.authorize(&pair.refresh_token, &Role::ALL).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }
}
