//! Image API Handlers
//!
//! Launches containers from previously built images.

use axum::Json;

use kiln_core::dto::image::{RunImageRequest, RunImageResponse};

use crate::api::error::{ApiError, ApiResult};
use crate::service::start_container;

/// POST /api/image/run
/// Start a detached container from a built image
pub async fn run_image(
    Json(request): Json<RunImageRequest>,
) -> ApiResult<Json<RunImageResponse>> {
    if request.image_name.trim().is_empty() {
        return Err(ApiError::BadRequest("imageName required".to_string()));
    }

    tracing::info!("Launching container from image {}", request.image_name);

    let container_id = start_container(&request.image_name)
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    Ok(Json(RunImageResponse {
        container_id,
        image_name: request.image_name,
    }))
}
