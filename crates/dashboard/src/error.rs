use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pgn_analysis::AnalysisError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Analysis(e @ (AnalysisError::EngineStart { .. } | AnalysisError::Engine(_))) => {
                tracing::error!("Engine failure: {e}");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Analysis(e) => {
                tracing::error!("Analysis error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}
