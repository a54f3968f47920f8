//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use eduhub_auth::{AuthorizationGate, JwtDecoder, JwtEncoder, LoginService, PasswordValidator};
use eduhub_core::config::AppConfig;
use eduhub_core::result::AppResult;
use eduhub_database::memory::MemoryBranchStore;
use eduhub_database::{BranchStore, DatabasePool, PrincipalStores};
use eduhub_service::{BranchService, PrincipalService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the server was started
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL pool, absent when running on in-memory stores
    pub database: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Token verification and role checks
    pub gate: Arc<AuthorizationGate>,
    /// Per-role login and token refresh
    pub login_service: Arc<LoginService>,

    // ── Services ─────────────────────────────────────────────
    /// Principal management
    pub principal_service: Arc<PrincipalService>,
    /// Branch management
    pub branch_service: Arc<BranchService>,
}

impl AppState {
    /// Wires the auth system and services over the given stores.
    pub fn new(
        config: AppConfig,
        stores: PrincipalStores,
        branches: Arc<dyn BranchStore>,
        database: Option<DatabasePool>,
    ) -> Self {
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));

        let gate = Arc::new(AuthorizationGate::new(Arc::clone(&decoder)));
        let login_service = Arc::new(LoginService::new(
            stores.clone(),
            encoder,
            decoder,
            config.auth.super_admin.clone(),
        ));

        let principal_service = Arc::new(PrincipalService::new(
            stores,
            Arc::clone(&branches),
            PasswordValidator::new(&config.auth),
        ));
        let branch_service = Arc::new(BranchService::new(branches));

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            database,
            gate,
            login_service,
            principal_service,
            branch_service,
        }
    }

    /// State backed by empty in-memory stores.
    pub fn in_memory(config: AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            config,
            PrincipalStores::in_memory()?,
            Arc::new(MemoryBranchStore::new()),
            None,
        ))
    }

    /// State backed by PostgreSQL.
    pub fn postgres(config: AppConfig, database: DatabasePool) -> AppResult<Self> {
        let stores = PrincipalStores::postgres(database.pool())?;
        let branches = Arc::new(eduhub_database::repositories::PgBranchRepository::new(
            database.pool().clone(),
        ));
        Ok(Self::new(config, stores, branches, Some(database)))
    }

    /// Configured bootstrap SuperAdmin id.
    pub fn bootstrap_id(&self) -> uuid::Uuid {
        self.config.auth.super_admin.id
    }
}
