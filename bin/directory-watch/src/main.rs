use anyhow::Result;
use directory_client::WebDirectory;
use directory_core::DirectoryCache;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod watcher;

use config::WatchConfig;
use watcher::Backoff;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting directory-watch...");

    let config = WatchConfig::from_env();
    info!(
        "Using directory {} for cell {}, refreshing every {:?}",
        config.client.base_url, config.cell_id, config.refresh_interval
    );

    let cache = Arc::new(DirectoryCache::new());
    let directory = WebDirectory::from_config(config.client.clone())?;

    let count = watcher::initialize_until_ready(&cache, &directory, config.cell_id, &Backoff::default()).await;
    info!("Directory ready with {} endpoints", count);
    watcher::report(&cache).await;

    // Periodic refresh loop
    let mut ticker = tokio::time::interval(config.refresh_interval);
    ticker.tick().await;
    loop {
        ticker.tick().await;

        if let Err(e) = cache.initialize(&directory, config.cell_id).await {
            error!("Error refreshing directory, keeping previous list: {}", e);
        }
        watcher::report(&cache).await;
    }
}
