//! Dalec build manifest
//!
//! The JSON document written into each build's scratch directory and read
//! by the Dalec frontend in place of a Dockerfile. Only the subset this
//! backend emits is modeled: a runtime dependency map and the image
//! entrypoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub dependencies: Dependencies,
    pub image: ImageSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dependencies {
    pub runtime: BTreeMap<String, RuntimeDependency>,
}

/// Per-package options. None are supported yet, so each package maps to
/// an empty object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeDependency {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSettings {
    pub entrypoint: String,
}

impl BuildManifest {
    /// Manifest for a dependencies-only image with a shell entrypoint.
    pub fn for_packages(packages: &[String]) -> Self {
        let runtime = packages
            .iter()
            .map(|name| (name.clone(), RuntimeDependency::default()))
            .collect();
        Self {
            dependencies: Dependencies { runtime },
            image: ImageSettings {
                entrypoint: "/bin/bash".to_string(),
            },
        }
    }

    /// Renders the manifest as pretty-printed JSON.
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
