//! Build domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::build::{BuildRequest, BuildSnapshot};

/// Build lifecycle state
///
/// Every build starts as `Running` and settles exactly once into
/// `Completed` or `Failed`. There are no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Running,
    Completed,
    Failed,
}

impl BuildStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BuildStatus::Completed | BuildStatus::Failed)
    }
}

/// Build execution record
///
/// Written by the supervision task as the underlying process produces
/// output and exits; read by status polls. All mutation is a no-op once
/// the record is terminal, so a settled record can never change under a
/// poller.
#[derive(Debug, Clone)]
pub struct BuildRecord {
    pub id: Uuid,
    pub status: BuildStatus,
    pub logs: Vec<String>,
    pub error: Option<String>,
    pub request: BuildRequest,
}

impl BuildRecord {
    pub fn new(id: Uuid, request: BuildRequest) -> Self {
        Self {
            id,
            status: BuildStatus::Running,
            logs: Vec::new(),
            error: None,
            request,
        }
    }

    /// Appends one chunk of captured output, preserving arrival order.
    pub fn push_chunk(&mut self, chunk: String) {
        if self.status.is_terminal() {
            return;
        }
        self.logs.push(chunk);
    }

    /// Marks the build successful.
    pub fn complete(&mut self) {
        if self.status.is_terminal() {
            return;
        }
        self.status = BuildStatus::Completed;
    }

    /// Marks the build failed with a human-readable reason.
    pub fn fail(&mut self, reason: impl Into<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = BuildStatus::Failed;
        self.error = Some(reason.into());
    }

    /// Point-in-time view answered to a status poll.
    pub fn snapshot(&self) -> BuildSnapshot {
        BuildSnapshot {
            status: self.status,
            logs: self.logs.clone(),
            error: self.error.clone(),
            image_name: self.request.image_name.clone(),
            os_target: self.request.os_target.clone(),
            packages: self.request.packages.clone(),
        }
    }
}
