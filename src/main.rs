use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use reelmatch_api::api::{create_router, AppState};
use reelmatch_api::catalog::Catalog;
use reelmatch_api::config::Config;
use reelmatch_api::services::providers::tmdb::TmdbProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.catalog_path, &config.similarity_path)?;
    tracing::info!(movies = catalog.len(), "Catalog loaded");

    let provider = Arc::new(TmdbProvider::new(&config)?);
    let state = AppState::new(catalog, provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
