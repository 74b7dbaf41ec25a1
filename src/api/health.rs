use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use reqwest::StatusCode;
use serde_json::json;

use tracing::error;

use crate::models::app_state::AppState;

pub fn health_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/detailed", get(health_detailed))
        .with_state(state.clone())
}

async fn health() -> impl IntoResponse {
    "OK".into_response()
}

async fn health_detailed(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let content_status = match state.get_content().health_check().await {
        Ok(_) => true,
        Err(e) => {
            error!("Failed content service health check: {}", e);
            false
        }
    };

    let json = json!({
        "platform": true,
        "content": content_status,
    });

    (StatusCode::OK, Json(json))
}
