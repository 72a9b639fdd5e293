//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, startup migrations, service wiring, and the
//! Axum server lifecycle.

use crate::application::services::{AuthService, LinkService, SessionService, TokenService};
use crate::config::Config;
use crate::infrastructure::email::{EmailNotifier, LogEmailNotifier};
use crate::infrastructure::persistence::{PgLinkRepository, PgTokenRepository, PgUserRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (tuned from config)
/// - Startup migrations
/// - Repository and service wiring
/// - Axum HTTP server with graceful ctrl-c shutdown
///
/// # Errors
///
/// Returns an error if the database connection, migration run, or server
/// bind fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let pool = Arc::new(pool);
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));
    let link_repository = Arc::new(PgLinkRepository::new(pool.clone()));

    let notifier: Arc<dyn EmailNotifier> = Arc::new(LogEmailNotifier);

    let session = SessionService::new(
        config.cookie_secret.clone(),
        config.dev_env,
        config.cookie_domain.clone(),
    );

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            user_repository.clone(),
            notifier,
            session.clone(),
        )),
        token_service: Arc::new(TokenService::new(token_repository, user_repository.clone())),
        link_service: Arc::new(LinkService::new(link_repository, user_repository)),
        session,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
