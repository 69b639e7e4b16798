//! Image launch payloads

use serde::{Deserialize, Serialize};

/// Request to start a container from a previously built image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunImageRequest {
    #[serde(default)]
    pub image_name: String,
}

/// Answer once the container is running.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunImageResponse {
    pub container_id: String,
    pub image_name: String,
}
