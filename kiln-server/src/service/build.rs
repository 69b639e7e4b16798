//! Build orchestration service
//!
//! Accepts submissions, owns the registry of build records, and hands each
//! accepted build to a supervision task. Submissions are validated before
//! any record or resource exists, so a rejected request leaves no trace.
//! There is no admission limit and no cancellation; a submitted build runs
//! until its process exits.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use kiln_core::domain::build::BuildRecord;
use kiln_core::dto::build::{BuildRequest, BuildSnapshot};

use crate::service::invocation::InvocationPlanner;
use crate::service::process;
use crate::service::registry::BuildRegistry;

/// Errors surfaced synchronously at submission time.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Required submission fields are missing or empty
    #[error("{0}")]
    InvalidSubmission(String),

    /// The invocation could not be prepared
    #[error("failed to prepare build invocation: {0}")]
    Planning(#[from] anyhow::Error),
}

/// Build orchestration entry point shared by all handlers.
pub struct BuildService {
    registry: BuildRegistry,
    planner: Arc<dyn InvocationPlanner>,
}

impl BuildService {
    pub fn new(planner: Arc<dyn InvocationPlanner>) -> Self {
        Self {
            registry: BuildRegistry::new(),
            planner,
        }
    }

    /// Validates a submission, registers its record, and starts the build
    /// process in the background. Returns the new build id immediately;
    /// progress is observed through `snapshot`.
    pub fn submit(&self, request: BuildRequest) -> Result<Uuid, SubmitError> {
        validate(&request)?;

        let id = Uuid::new_v4();
        let plan = self.planner.plan(id, &request)?;

        let record = self.registry.insert(BuildRecord::new(id, request));
        tracing::info!(
            "Build {} submitted ({} records live)",
            id,
            self.registry.len()
        );

        tokio::spawn(process::supervise(id, record, plan));

        Ok(id)
    }

    /// Point-in-time view of one build, or None for an unknown id.
    pub fn snapshot(&self, id: Uuid) -> Option<BuildSnapshot> {
        self.registry
            .get(id)
            .map(|record| record.lock().unwrap().snapshot())
    }
}

fn validate(request: &BuildRequest) -> Result<(), SubmitError> {
    let usable = |s: &str| !s.trim().is_empty();

    if usable(&request.image_name)
        && usable(&request.os_target)
        && !request.packages.is_empty()
        && request.packages.iter().all(|p| usable(p))
    {
        return Ok(());
    }

    Err(SubmitError::InvalidSubmission(
        "imageName, osTarget and packages[] required".to_string(),
    ))
}
