//! Package Catalog API Handler

use axum::Json;

use crate::service::installable_packages;

/// GET /api/packages
/// List packages offered for selection in the UI
pub async fn list_packages() -> Json<Vec<&'static str>> {
    Json(installable_packages().to_vec())
}
