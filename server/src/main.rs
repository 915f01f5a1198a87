#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code so a bad request can never panic the server.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::net::SocketAddr;
use std::sync::Arc;

use fintrust_server::{
    AppState, InMemoryUserStore, UserStore,
    auth::{PasswordHasher, TokenService},
    bootstrap::seed_admin,
    build_router,
    config::ServerConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrust_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: listen_port={}, admin_email={}, bcrypt_cost={}",
        config.listen_port,
        config.admin_email,
        config.bcrypt_cost
    );

    let tokens = match TokenService::new(config.jwt_secret.as_bytes()) {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::error!("Failed to initialise token service: {e}");
            std::process::exit(1);
        }
    };

    let passwords = PasswordHasher::new(config.bcrypt_cost);
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());

    if let Err(e) = seed_admin(
        store.as_ref(),
        &passwords,
        &config.admin_email,
        &config.admin_password,
    )
    .await
    {
        tracing::error!("Failed to seed admin account: {e}");
        std::process::exit(1);
    }

    let state = AppState::new(store, passwords, tokens, &config.admin_email);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.listen_port));
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind: {e}");
            std::process::exit(1);
        });

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    });
}
