mod cli;

use crate::cli::{StorageBackendArg, CLI};
use clap::Parser;
use shortlink_core::KeyValueStore;
use shortlink_gateway::{App, AppState};
use shortlink_service::LinkService;
use shortlink_storage::{InMemoryStore, RedisStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %config.storage,
        "starting shortlink server"
    );

    match config.storage {
        StorageBackendArg::InMemory => {
            run_server(config.listen_addr, &config.public_base_url, InMemoryStore::new()).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .ok_or("redis url is required when storage backend is redis")?;
            let store = RedisStore::connect(&redis_url).await?;
            run_server(config.listen_addr, &config.public_base_url, store).await?;
        }
    }

    Ok(())
}

async fn run_server<S: KeyValueStore>(
    listen_addr: std::net::SocketAddr,
    public_base_url: &str,
    store: S,
) -> std::io::Result<()> {
    let state = AppState::new(Arc::new(LinkService::new(store)), public_base_url);

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
