//! HTTP server initialization and runtime setup.
//!
//! Wires the connection pool, migrations, bot verification, and the Axum
//! server lifecycle together from a validated [`Config`].

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::InsertContext;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::infrastructure::recaptcha::{BotVerifier, NullVerifier, RecaptchaVerifier};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - bounded PostgreSQL connection pool
/// - embedded migrations
/// - insert context (alphabets and limits)
/// - bot verifier (real or no-op per feature switch)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if the database connection, migration run, bind, or
/// server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let insert_ctx = Arc::new(InsertContext::new(
        &config.link_alphabet,
        &config.link_extensions,
        config.link_length,
        config.max_destination_length,
        config.creation_tries,
    )?);

    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(LinkService::new(repository, insert_ctx.clone()));

    let verifier: Arc<dyn BotVerifier> = if config.recaptcha_enabled {
        let secret = config
            .recaptcha_secret
            .clone()
            .context("RECAPTCHA_SECRET must be set when RECAPTCHA_ENABLED is true")?;
        tracing::info!("Recaptcha verification enabled");
        Arc::new(RecaptchaVerifier::new(
            secret,
            config.recaptcha_min_score,
            config.recaptcha_verify_ip,
        ))
    } else {
        tracing::info!("Recaptcha verification disabled");
        Arc::new(NullVerifier)
    };

    let state = AppState::new(
        link_service,
        insert_ctx,
        verifier,
        config.admin_pass.clone(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
