pub mod cache;
pub mod config;
pub mod error;
pub mod routes;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::cache::AnalysisCache;
use crate::config::Config;

/// Build the API router with its shared state.
pub fn router(config: Config, cache: AnalysisCache) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/analyses", post(routes::analyses::create_analysis))
        .route("/api/analyses/{id}", get(routes::analyses::get_analysis))
        .route("/api/analyses/{id}/games/{index}", get(routes::analyses::get_game))
        .route(
            "/api/analyses/{id}/games/{index}/csv",
            get(routes::analyses::download_csv),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(Extension(cache))
        .layer(Extension(config))
        .layer(cors)
}
