use farm_ledger::config::AppConfig;
use farm_ledger::{create_router, initialize_backend};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    info!("Using database at {}", config.database_url());

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, config.allowed_origin.clone());

    info!("Starting server on {}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
