//! Health Check API Handler
//!
//! Simple health endpoint for diagnostics.

use axum::{Json, response::IntoResponse};
use chrono::{SecondsFormat, Utc};

/// GET /api/health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
