//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::ServiceHealth;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub models: String,
    pub started_at: String,
}

/// Health check endpoint handler; 503 while models are unavailable
pub async fn health_check(
    State(health): State<ServiceHealth>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, code, models) = match health.models_ready {
        Some(true) => ("healthy", StatusCode::OK, "ready"),
        Some(false) => ("degraded", StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        None => ("healthy", StatusCode::OK, "none"),
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            service: health.service.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            models: models.to_string(),
            started_at: health.started_at.to_rfc3339(),
        }),
    )
}
