//! Identity API server entry point.

#![forbid(unsafe_code)]
#![deny(warnings)]

mod config;

use idp_api::{identity_router, ServiceState};
use idp_storage_sql::{create_pool, PoolConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool_config = PoolConfig::new(config.database_url.clone())
        .min_connections(config.db_min_connections)
        .max_connections(config.db_max_connections);
    let pool = create_pool(&pool_config).await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("migrations applied");

    let app = identity_router().with_state(ServiceState::new(pool));
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "identity API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler");
        return;
    }
    tracing::info!("shutting down");
}
