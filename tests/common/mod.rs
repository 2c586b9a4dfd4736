use dashboard::cache::AnalysisCache;
use dashboard::config::Config;
use pgn_analysis::EngineConfig;
use reqwest::Client;

/// Build a reqwest client for tests.
#[allow(dead_code)]
pub fn client() -> Client {
    Client::new()
}

/// Dashboard config pointing at the given engine binary.
#[allow(dead_code)]
pub fn config_with_engine(engine_path: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        max_upload_bytes: 16 * 1024,
        cache_entries: 8,
        engine: EngineConfig {
            engine_path: engine_path.to_string(),
            depth: 10,
            ..Default::default()
        },
    }
}

/// Serve the dashboard on an ephemeral port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_dashboard(config: Config) -> String {
    let cache = AnalysisCache::with_capacity(config.cache_entries);
    spawn_dashboard_with_cache(config, cache).await
}

/// Same as `spawn_dashboard`, sharing `cache` so tests can inspect it.
#[allow(dead_code)]
pub async fn spawn_dashboard_with_cache(config: Config, cache: AnalysisCache) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local addr");
    let app = dashboard::router(config, cache);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });
    format!("http://{addr}")
}

/// Engine binary for tests that need a real engine, if one can be found.
#[allow(dead_code)]
pub fn engine_path() -> String {
    std::env::var("STOCKFISH_PATH").unwrap_or_else(|_| "stockfish".to_string())
}
