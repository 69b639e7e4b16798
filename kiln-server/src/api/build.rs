//! Build API Handlers
//!
//! HTTP endpoints for submitting builds and polling their progress.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use kiln_core::dto::build::{BuildRequest, BuildSnapshot, BuildSubmitted};

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::SubmitError;

/// POST /api/build
/// Validate a submission and start the build process in the background
pub async fn start_build(
    State(state): State<AppState>,
    Json(request): Json<BuildRequest>,
) -> ApiResult<Json<BuildSubmitted>> {
    tracing::info!(
        "Build requested: image={} target={} packages={}",
        request.image_name,
        request.os_target,
        request.packages.len()
    );

    let build_id = state.builds.submit(request).map_err(|e| match e {
        SubmitError::InvalidSubmission(msg) => ApiError::BadRequest(msg),
        SubmitError::Planning(err) => ApiError::InternalError(err.to_string()),
    })?;

    Ok(Json(BuildSubmitted { build_id }))
}

/// GET /api/build/{id}/status
/// Poll one build's status, log, error, and original parameters
pub async fn build_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BuildSnapshot>> {
    tracing::debug!("Status poll for build {}", id);

    // Ids are opaque to callers; anything unparseable is simply unknown.
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let snapshot = state.builds.snapshot(id).ok_or_else(not_found)?;

    Ok(Json(snapshot))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Build not found".to_string())
}
