use dashboard::cache::AnalysisCache;
use dashboard::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!(
        engine = %config.engine.engine_path,
        depth = config.engine.depth,
        "Dashboard config loaded"
    );

    let addr = format!("{}:{}", config.host, config.port);
    let cache = AnalysisCache::with_capacity(config.cache_entries);
    let app = dashboard::router(config, cache);

    tracing::info!("Starting dashboard on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
