use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod service;

use std::sync::Arc;

use anyhow::Context;

use crate::api::AppState;
use crate::config::Config;
use crate::service::{BuildService, DalecPlanner, TargetProbe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiln_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kiln backend...");

    let config = Config::from_env();
    config.validate()?;

    let state = AppState {
        builds: Arc::new(BuildService::new(Arc::new(DalecPlanner::new(
            config.frontend_image.clone(),
        )))),
        probe: Arc::new(TargetProbe::for_frontend(
            &config.frontend_image,
            config.probe_timeout,
        )),
    };

    let app = api::create_router(state, &config.public_dir);

    // A previous instance may have left its socket file behind.
    match tokio::fs::remove_file(&config.socket_path).await {
        Ok(()) => tracing::info!("Removed existing socket file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "failed to remove stale socket {}",
                    config.socket_path.display()
                )
            });
        }
    }

    let listener = tokio::net::UnixListener::bind(&config.socket_path)
        .with_context(|| format!("failed to bind socket {}", config.socket_path.display()))?;

    tracing::info!("Listening on socket {}", config.socket_path.display());
    tracing::info!("Serving UI bundle from {}", config.public_dir.display());

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
