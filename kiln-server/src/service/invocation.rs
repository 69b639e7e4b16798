//! Build invocation planning
//!
//! Translates a validated submission into the exact process to run: the
//! program, its argument vector, environment, and the scratch directory
//! holding the rendered manifest. Arguments stay a structured vector end
//! to end; nothing here passes through a shell. The trait seam lets the
//! build service run under test with plain commands instead of a
//! container engine.

use std::path::PathBuf;

use anyhow::Context;
use uuid::Uuid;

use kiln_core::dto::build::BuildRequest;
use kiln_core::manifest::BuildManifest;

/// Dalec frontend image used when none is configured.
pub const DEFAULT_FRONTEND_IMAGE: &str = "ghcr.io/project-dalec/dalec/frontend:latest";

/// Suffix marking a buildx target as a runtime-dependencies-only image.
pub const DEPS_ONLY_TARGET_SUFFIX: &str = "/container/depsonly";

/// File name the manifest is written under inside the scratch directory.
/// The Dalec frontend reads it in place of a Dockerfile.
pub const MANIFEST_FILE_NAME: &str = "Dockerfile";

/// Fully resolved process invocation for one build.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub scratch: Option<ScratchPlan>,
}

/// Scratch directory to materialize before spawning and remove after the
/// process is gone.
#[derive(Debug, Clone)]
pub struct ScratchPlan {
    pub dir: PathBuf,
    pub manifest: String,
}

/// Turns a validated submission into a runnable plan.
pub trait InvocationPlanner: Send + Sync {
    fn plan(&self, build_id: Uuid, request: &BuildRequest) -> anyhow::Result<BuildPlan>;
}

/// Production planner invoking `docker build` through the Dalec frontend.
pub struct DalecPlanner {
    frontend_image: String,
    scratch_root: PathBuf,
}

impl DalecPlanner {
    pub fn new(frontend_image: impl Into<String>) -> Self {
        Self {
            frontend_image: frontend_image.into(),
            scratch_root: std::env::temp_dir(),
        }
    }
}

impl Default for DalecPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_FRONTEND_IMAGE)
    }
}

impl InvocationPlanner for DalecPlanner {
    fn plan(&self, build_id: Uuid, request: &BuildRequest) -> anyhow::Result<BuildPlan> {
        let dir = self.scratch_root.join(format!("dalec-build-{}", build_id));
        let manifest = BuildManifest::for_packages(&request.packages)
            .render()
            .context("failed to render build manifest")?;

        let args = vec![
            "build".to_string(),
            "-t".to_string(),
            request.image_name.clone(),
            "--build-arg".to_string(),
            format!("BUILDKIT_SYNTAX={}", self.frontend_image),
            "--target".to_string(),
            format!("{}{}", request.os_target, DEPS_ONLY_TARGET_SUFFIX),
            dir.display().to_string(),
        ];

        Ok(BuildPlan {
            program: "docker".to_string(),
            args,
            env: vec![("DOCKER_BUILDKIT".to_string(), "1".to_string())],
            scratch: Some(ScratchPlan { dir, manifest }),
        })
    }
}
