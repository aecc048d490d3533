//! Sales microservice entrypoint
//!
//! Loads [`ServiceConfig`] (YAML from `SALES_CONFIG` plus `SALES_*` overrides),
//! installs the tracing subscriber, connects the configured store and serves
//! the API until SIGTERM or Ctrl+C.

use anyhow::{Context, Result};
use sales::config::ServiceConfig;
use sales::server::ServerBuilder;
use sales::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::load().context("failed to load configuration")?;

    // RUST_LOG wins over log.level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        backend = %config.store.backend,
        table = %config.store.table_name,
        "Starting Sales Microservice"
    );

    let repository = storage::connect(&config.store)?;

    ServerBuilder::new()
        .with_repository(repository, config.store.timeout())
        .serve(&config.server.bind_address())
        .await
}
