//! Platform Target API Handler

use axum::{Json, extract::State};

use crate::api::AppState;

/// GET /api/os
/// List the OS targets the build frontend can produce; answers the static
/// fallback list when discovery is unavailable
pub async fn list_targets(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.probe.fetch().await)
}
