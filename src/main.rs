//! EduHub Server: authentication and administration backend for a
//! multi-branch learning centre.
//!
//! Main entry point that loads configuration, initializes logging, and
//! starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use eduhub_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("EDUHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, version = env!("CARGO_PKG_VERSION"), "Configuration loaded");
    warn_on_default_secrets(&config);

    if let Err(e) = eduhub_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

fn warn_on_default_secrets(config: &AppConfig) {
    if config.auth.uses_default_secret() {
        tracing::warn!("auth.jwt_secret is the built-in default; set EDUHUB__AUTH__JWT_SECRET");
    }
    if config.auth.super_admin.uses_default_password() {
        tracing::warn!(
            "auth.super_admin.password is the built-in default; set EDUHUB__AUTH__SUPER_ADMIN__PASSWORD"
        );
    }
}
