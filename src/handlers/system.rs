use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET / - service descriptor
pub async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Advocate Directory",
        "version": version,
        "source": state.advocates.source_kind(),
        "endpoints": {
            "advocates": "/api/advocates?search=&page=&limit=",
            "health": "/health",
        }
    }))
}

/// GET /health - record source reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    let source = state.advocates.source_kind();

    match state.advocates.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "source": source,
                "timestamp": now,
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "source": source,
                    "timestamp": now,
                    "error": "record source unavailable",
                })),
            )
        }
    }
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
