use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fuel_tracker::config::database::run_migrations;
use fuel_tracker::config::{DatabaseConfig, EnvironmentConfig};
use fuel_tracker::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    info!("⛽ Fuel Tracker API");
    info!("Environment: {}", config.environment);

    let pool = DatabaseConfig::new(config.database_url.clone())
        .create_pool()
        .await
        .context("failed to connect to the database")?;

    run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("✅ Database ready");

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server_url()))?;

    let app = create_router(AppState::with_pool(pool, config));

    info!("🌐 Server listening on http://{}", addr);
    info!("   GET    /health");
    info!("   POST   /api/auth/register | /api/auth/login");
    info!("   GET    /api/auth/me");
    info!("   CRUD   /api/vehicles");
    info!("   GET    /api/vehicles/:id/refuelings | statistics | consumption-graph | cost-graph");
    info!("   CRUD   /api/refuelings");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Server error: {}", e);
            e
        })?;

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
