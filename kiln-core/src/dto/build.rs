//! Build request and response payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::build::BuildStatus;

/// Submission payload for a new build.
///
/// Every field defaults so that absent keys deserialize to empty values;
/// validation then rejects them with one uniform message instead of the
/// JSON layer answering with a different shape per missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildRequest {
    #[serde(default)]
    pub image_name: String,
    #[serde(default)]
    pub os_target: String,
    #[serde(default)]
    pub packages: Vec<String>,
}

/// Answer to an accepted submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSubmitted {
    pub build_id: Uuid,
}

/// Point-in-time view of one build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSnapshot {
    pub status: BuildStatus,
    pub logs: Vec<String>,
    pub error: Option<String>,
    pub image_name: String,
    pub os_target: String,
    pub packages: Vec<String>,
}
