use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: ServiceHealth,
}

#[derive(Serialize)]
pub struct ServiceHealth {
    pub openai: String,
}

/// Health check endpoint - public
///
/// Reports whether the model client is configured; no outbound call is made.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let openai = if state.openai.is_some() {
        "configured"
    } else {
        "not configured"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: ServiceHealth {
            openai: openai.to_string(),
        },
    })
}
