//! Login flow: credential check against the role's store, then token issue.

use std::sync::Arc;

use subtle::ConstantTimeEq;
use tracing::{info, warn};

use eduhub_core::config::SuperAdminConfig;
use eduhub_core::error::AppError;
use eduhub_database::PrincipalStores;
use eduhub_entity::Role;

use crate::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use crate::password::PasswordHasher;

/// Message shared by every credential failure so the response does not
/// reveal whether the login exists.
const INVALID_CREDENTIALS: &str = "Invalid login or password";

/// Authenticates principals of any role and issues their tokens.
#[derive(Clone)]
pub struct LoginService {
    stores: PrincipalStores,
    hasher: PasswordHasher,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    super_admin: SuperAdminConfig,
}

impl std::fmt::Debug for LoginService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginService")
            .field("stores", &self.stores)
            .field("super_admin", &self.super_admin)
            .finish()
    }
}

impl LoginService {
    /// Creates a login service over the given stores.
    pub fn new(
        stores: PrincipalStores,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        super_admin: SuperAdminConfig,
    ) -> Self {
        Self {
            stores,
            hasher: PasswordHasher,
            encoder,
            decoder,
            super_admin,
        }
    }

    /// Authenticate `login`/`password` as a principal of `role`.
    ///
    /// An unknown login and a wrong password fail with the same
    /// `InvalidCredentials` error. Store failures propagate unchanged.
    pub async fn login(
        &self,
        role: Role,
        login: &str,
        password: &str,
    ) -> Result<TokenPair, AppError> {
        if role == Role::SuperAdmin {
            return self.login_super_admin(login, password);
        }

        let store = self.stores.require(role)?;
        let Some(principal) = store.get_by_login(login).await? else {
            warn!(role = %role, login = %login, "Login failed: unknown login");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(password, &principal.password_hash)?
        {
            warn!(role = %role, login = %login, "Login failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let tokens = self.encoder.issue_token_pair(principal.id, role)?;
        info!(role = %role, login = %login, principal_id = %principal.id, "Login successful");
        Ok(tokens)
    }

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// The principal must still exist; a soft-deleted principal cannot
    /// refresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let role = claims.role;

        let exists = if role == Role::SuperAdmin {
            claims.sub == self.super_admin.id
        } else {
            self.stores
                .require(role)?
                .get_by_id(claims.sub)
                .await?
                .is_some()
        };

        if !exists {
            warn!(role = %role, principal_id = %claims.sub, "Refresh rejected: principal no longer exists");
            return Err(AppError::token_invalid("Token subject no longer exists"));
        }

        let tokens = self.encoder.issue_token_pair(claims.sub, role)?;
        info!(role = %role, principal_id = %claims.sub, "Tokens refreshed");
        Ok(tokens)
    }

    fn login_super_admin(&self, login: &str, password: &str) -> Result<TokenPair, AppError> {
        let login_ok = login.as_bytes().ct_eq(self.super_admin.login.as_bytes());
        let password_ok = password
            .as_bytes()
            .ct_eq(self.super_admin.password.as_bytes());

        if !bool::from(login_ok & password_ok) {
            warn!(role = %Role::SuperAdmin, login = %login, "Login failed");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let tokens = self
            .encoder
            .issue_token_pair(self.super_admin.id, Role::SuperAdmin)?;
        info!(role = %Role::SuperAdmin, principal_id = %self.super_admin.id, "Login successful");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eduhub_core::config::AuthConfig;
    use eduhub_core::error::ErrorKind;
    use eduhub_entity::{NewPrincipal, PrincipalProfile};
    use uuid::Uuid;

    struct Fixture {
        service: LoginService,
        stores: PrincipalStores,
        decoder: Arc<JwtDecoder>,
        config: AuthConfig,
    }

    fn fixture() -> Fixture {
        let config = AuthConfig::default();
        let stores = PrincipalStores::in_memory().unwrap();
        let decoder = Arc::new(JwtDecoder::new(&config));
        let service = LoginService::new(
            stores.clone(),
            Arc::new(JwtEncoder::new(&config)),
            decoder.clone(),
            config.super_admin.clone(),
        );
        Fixture {
            service,
            stores,
            decoder,
            config,
        }
    }

    async fn create(stores: &PrincipalStores, role: Role, password: &str) -> eduhub_entity::Principal {
        let hash = PasswordHasher.hash_password(password).unwrap();
        stores
            .require(role)
            .unwrap()
            .create(&NewPrincipal {
                fullname: "Aziz Rahimov".to_string(),
                phone: "+998901112233".to_string(),
                password_hash: hash,
                branch_id: None,
                profile: PrincipalProfile::default(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_token_for_role() {
        let f = fixture();
        let teacher = create(&f.stores, Role::Teacher, "Teach3r_pass").await;
        assert_eq!(teacher.login, "T00001");

        let tokens = f
            .service
            .login(Role::Teacher, "T00001", "Teach3r_pass")
            .await
            .unwrap();
        let claims = f.decoder.decode_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, teacher.id);
        assert_eq!(claims.role, Role::Teacher);
    }

    #[tokio::test]
    async fn test_unknown_login_and_wrong_password_are_indistinguishable() {
        let f = fixture();
        create(&f.stores, Role::Student, "Stud3nt_pass").await;

        let unknown = f
            .service
            .login(Role::Student, "S09999", "Stud3nt_pass")
            .await
            .unwrap_err();
        let wrong = f
            .service
            .login(Role::Student, "S00001", "not-the-password1")
            .await
            .unwrap_err();

        assert_eq!(unknown.kind, ErrorKind::InvalidCredentials);
        assert_eq!(unknown.kind, wrong.kind);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_login_is_scoped_to_role_store() {
        let f = fixture();
        create(&f.stores, Role::Manager, "Manag3r_pass").await;

        let err = f
            .service
            .login(Role::Administration, "M00001", "Manag3r_pass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_soft_deleted_principal_cannot_login() {
        let f = fixture();
        let admin = create(&f.stores, Role::Administration, "Adm1n_pass").await;
        let store = f.stores.require(Role::Administration).unwrap();
        assert!(store.delete(admin.id).await.unwrap());

        let err = f
            .service
            .login(Role::Administration, "A00001", "Adm1n_pass")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_super_admin_requires_exact_credentials() {
        let f = fixture();
        let sa = &f.config.super_admin;

        let tokens = f
            .service
            .login(Role::SuperAdmin, &sa.login, &sa.password)
            .await
            .unwrap();
        let claims = f.decoder.decode_access_token(&tokens.access_token).unwrap();
        assert_eq!(claims.sub, sa.id);
        assert_eq!(claims.role, Role::SuperAdmin);

        for (login, password) in [
            (sa.login.to_lowercase(), sa.password.clone()),
            (sa.login.clone(), format!("{} ", sa.password)),
            (String::new(), String::new()),
        ] {
            let err = f
                .service
                .login(Role::SuperAdmin, &login, &password)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        }
    }

    #[tokio::test]
    async fn test_refresh_reissues_for_live_principal() {
        let f = fixture();
        let support = create(&f.stores, Role::SupportTeacher, "Supp0rt_pass").await;
        let tokens = f
            .service
            .login(Role::SupportTeacher, "ST00001", "Supp0rt_pass")
            .await
            .unwrap();

        let refreshed = f.service.refresh(&tokens.refresh_token).await.unwrap();
        let claims = f
            .decoder
            .decode_access_token(&refreshed.access_token)
            .unwrap();
        assert_eq!(claims.sub, support.id);

        let err = f.service.refresh(&tokens.access_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);

        f.stores
            .require(Role::SupportTeacher)
            .unwrap()
            .delete(support.id)
            .await
            .unwrap();
        let err = f.service.refresh(&tokens.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }

    #[tokio::test]
    async fn test_refresh_rejects_foreign_super_admin_subject() {
        let f = fixture();
        let encoder = JwtEncoder::new(&f.config);
        let forged = encoder
            .issue_token_pair(Uuid::new_v4(), Role::SuperAdmin)
            .unwrap();
        let err = f.service.refresh(&forged.refresh_token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TokenInvalid);
    }
}
