//! API Module
//!
//! HTTP layer of the backend. Each submodule handles endpoints for a
//! specific domain; routing, shared state, and middleware are assembled
//! here. Anything outside `/api` falls through to the static UI bundle.

pub mod build;
pub mod catalog;
pub mod error;
pub mod health;
pub mod image;
pub mod platform;

use std::path::Path;
use std::sync::Arc;

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    response::Html,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::service::{BuildService, TargetProbe};

/// Shared handles every handler can reach.
#[derive(Clone)]
pub struct AppState {
    pub builds: Arc<BuildService>,
    pub probe: Arc<TargetProbe>,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health::health_check))
        // Catalog endpoints
        .route("/api/os", get(platform::list_targets))
        .route("/api/packages", get(catalog::list_packages))
        // Build endpoints
        .route("/api/build", post(build::start_build))
        .route("/api/build/{id}/status", get(build::build_status))
        // Image endpoints
        .route("/api/image/run", post(image::run_image))
        // UI bundle, with an inline page when the bundle is missing
        .fallback_service(ServeDir::new(public_dir).not_found_service(missing_ui.into_service()))
        // Add state and middleware
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Served when the UI bundle has not been copied next to the backend.
async fn missing_ui() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html><html><head><title>Dalec Fallback</title></head>\
         <body><h1>Dalec Extension Fallback</h1>\
         <p>index.html missing; check build logs.</p></body></html>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{BuildPlan, InvocationPlanner};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use kiln_core::dto::build::BuildRequest;
    use std::path::PathBuf;
    use std::time::Duration;
    use tower::ServiceExt;
    use uuid::Uuid;

    struct EchoPlanner;

    impl InvocationPlanner for EchoPlanner {
        fn plan(&self, build_id: Uuid, _request: &BuildRequest) -> anyhow::Result<BuildPlan> {
            Ok(BuildPlan {
                program: "sh".to_string(),
                args: vec!["-c".to_string(), format!("echo building {}", build_id)],
                env: vec![],
                scratch: None,
            })
        }
    }

    fn probe(command: &[&str]) -> Arc<TargetProbe> {
        Arc::new(TargetProbe {
            command: command.iter().map(|s| s.to_string()).collect(),
            stdin_payload: None,
            timeout: Duration::from_secs(5),
        })
    }

    fn test_state() -> AppState {
        AppState {
            builds: Arc::new(BuildService::new(Arc::new(EchoPlanner))),
            probe: probe(&["kiln-no-such-binary"]),
        }
    }

    fn unused_dir() -> PathBuf {
        PathBuf::from("/nonexistent-ui-bundle")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();
        (status, body)
    }

    fn json(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok_with_timestamp() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, get("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        let body = json(&body);
        assert_eq!(body["status"], "ok");
        let time = body["time"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[tokio::test]
    async fn test_packages_lists_the_catalog() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, get("/api/packages")).await;

        assert_eq!(status, StatusCode::OK);
        let packages = json(&body);
        let packages = packages.as_array().unwrap();
        assert_eq!(packages.len(), 54);
        assert!(packages.contains(&serde_json::json!("curl")));
    }

    #[tokio::test]
    async fn test_os_answers_fallback_when_discovery_fails() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, get("/api/os")).await;

        assert_eq!(status, StatusCode::OK);
        let targets = json(&body);
        let targets = targets.as_array().unwrap();
        assert!(!targets.is_empty());
        assert!(targets.contains(&serde_json::json!("azlinux3")));
    }

    #[tokio::test]
    async fn test_os_answers_live_targets() {
        let mut state = test_state();
        state.probe = probe(&[
            "sh",
            "-c",
            r#"echo '{"targets":[{"name":"testos/container/depsonly"}],"sources":null}'"#,
        ]);
        let router = create_router(state, &unused_dir());
        let (status, body) = send(router, get("/api/os")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body), serde_json::json!(["testos"]));
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_submission() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, post_json("/api/build", serde_json::json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json(&body),
            serde_json::json!({"error": "imageName, osTarget and packages[] required"})
        );
    }

    #[tokio::test]
    async fn test_status_of_unknown_build_is_404() {
        let router = create_router(test_state(), &unused_dir());
        let uri = format!("/api/build/{}/status", Uuid::new_v4());
        let (status, body) = send(router, get(&uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body), serde_json::json!({"error": "Build not found"}));
    }

    #[tokio::test]
    async fn test_status_of_malformed_id_is_404() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, get("/api/build/not-a-real-id/status")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json(&body), serde_json::json!({"error": "Build not found"}));
    }

    #[tokio::test]
    async fn test_build_round_trip_over_http() {
        let state = test_state();
        let dir = unused_dir();

        let (status, body) = send(
            create_router(state.clone(), &dir),
            post_json(
                "/api/build",
                serde_json::json!({
                    "imageName": "app:http",
                    "osTarget": "azlinux3",
                    "packages": ["curl"],
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let build_id = json(&body)["buildId"].as_str().unwrap().to_string();

        let uri = format!("/api/build/{}/status", build_id);
        let mut last = serde_json::Value::Null;
        for _ in 0..500 {
            let (status, body) = send(create_router(state.clone(), &dir), get(&uri)).await;
            assert_eq!(status, StatusCode::OK);
            last = json(&body);
            if last["status"] != "running" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(last["status"], "completed");
        assert!(last["error"].is_null());
        assert_eq!(last["imageName"], "app:http");
        assert_eq!(last["osTarget"], "azlinux3");
        assert_eq!(last["packages"], serde_json::json!(["curl"]));
        let logs = last["logs"].as_array().unwrap();
        assert!(
            logs.iter()
                .any(|chunk| chunk.as_str().unwrap().contains("building"))
        );
    }

    #[tokio::test]
    async fn test_run_image_requires_a_name() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) =
            send(router, post_json("/api/image/run", serde_json::json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json(&body), serde_json::json!({"error": "imageName required"}));
    }

    #[tokio::test]
    async fn test_root_serves_ui_bundle_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("index.html"), "<html>kiln-ui</html>").unwrap();

        let router = create_router(test_state(), tmp.path());
        let (status, body) = send(router, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(body).unwrap().contains("kiln-ui"));
    }

    #[tokio::test]
    async fn test_root_serves_fallback_page_when_bundle_missing() {
        let router = create_router(test_state(), &unused_dir());
        let (status, body) = send(router, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(
            String::from_utf8(body)
                .unwrap()
                .contains("Dalec Extension Fallback")
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let router = create_router(test_state(), &unused_dir());
        let request = Request::builder()
            .uri("/api/health")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
