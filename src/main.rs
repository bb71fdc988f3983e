//! Enlace fleet service.
//!
//! Main entry point. Initializes tracing, loads configuration, establishes
//! the database pool, wires the coordinator relay and starts the HTTP server
//! with graceful shutdown.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use enlace_api::{AppState, Config};
use enlace_core::{storage::Storage, time::RealClock};
use enlace_relay::{CoordinatorNotifier, RelayService, StoreAggregator};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Enlace fleet service");

    let config = Config::load()?;
    info!(
        database_url = %config.database_url_masked(),
        server_addr = %config.server_addr()?,
        coordinator_send_url = %config.coordinator_send_url,
        "Configuration loaded"
    );

    let db_pool = create_database_pool(&config).await?;
    info!("Database connection pool established");

    run_migrations(&db_pool).await?;
    info!("Database migrations completed");

    let storage = Storage::new(db_pool.clone());
    let clock = Arc::new(RealClock::new());

    let notifier = CoordinatorNotifier::new(
        config.coordinator_send_url.clone(),
        Duration::from_secs(config.delivery_timeout_seconds),
    )?;
    let relay = Arc::new(RelayService::new(
        Arc::new(StoreAggregator::new(storage.clone())),
        notifier,
        clock.clone(),
    ));

    let state = AppState { storage, relay, clock };
    let addr = config.server_addr()?;

    let server_handle = tokio::spawn(async move {
        if let Err(e) = enlace_api::start_server(state, addr).await {
            error!(error = %e, "Server failed");
        }
    });

    info!(addr = %addr, "Enlace is ready to receive coordinator webhooks");

    shutdown_signal().await;
    info!("Shutdown signal received, starting graceful shutdown");

    // Give in-flight requests time to complete
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(30)) => {
            info!("Shutdown grace period expired");
        }
        _ = server_handle => {
            info!("Server stopped");
        }
    }

    db_pool.close().await;
    info!("Database connections closed");

    info!("Enlace shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,enlace=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Creates the database connection pool with retry logic.
async fn create_database_pool(config: &Config) -> Result<sqlx::PgPool> {
    let mut retries = 0;
    const MAX_RETRIES: u32 = 5;
    const RETRY_DELAY: Duration = Duration::from_secs(2);

    loop {
        match PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                // Verify connection works
                sqlx::query("SELECT 1")
                    .fetch_one(&pool)
                    .await
                    .context("Failed to verify database connection")?;

                return Ok(pool);
            },
            Err(_e) if retries < MAX_RETRIES => {
                retries += 1;
                info!(
                    attempt = retries,
                    max_retries = MAX_RETRIES,
                    "Database connection failed, retrying..."
                );
                tokio::time::sleep(RETRY_DELAY).await;
            },
            Err(e) => {
                return Err(e).context("Failed to create database connection pool after retries");
            },
        }
    }
}

/// Ensures the entity tables exist.
async fn run_migrations(pool: &sqlx::PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bikes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            model TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create bikes table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            model TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create cars table")?;

    Ok(())
}

/// Waits for shutdown signal (CTRL+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received CTRL+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
