//! OS target discovery
//!
//! Asks the Dalec frontend which OS targets it can build by running
//! `docker buildx build --call targets` under a bounded timeout. Every
//! failure mode collapses into a curated fallback list: `fetch` never
//! errors and never answers an empty list.

use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::service::invocation::DEPS_ONLY_TARGET_SUFFIX;

/// Targets served when live discovery is unavailable.
const FALLBACK_TARGETS: [&str; 4] = ["azlinux3", "mariner2", "almalinux8", "almalinux9"];

/// Resilient OS target discovery around an external command.
pub struct TargetProbe {
    pub(crate) command: Vec<String>,
    pub(crate) stdin_payload: Option<String>,
    pub(crate) timeout: Duration,
}

#[derive(Deserialize)]
struct TargetList {
    targets: Option<Vec<TargetEntry>>,
}

#[derive(Deserialize)]
struct TargetEntry {
    name: String,
}

impl TargetProbe {
    /// Probe listing the targets of the given frontend image. A stub
    /// manifest travels on stdin so no build context has to exist on disk.
    pub fn for_frontend(frontend_image: &str, timeout: Duration) -> Self {
        let command = vec![
            "docker".to_string(),
            "buildx".to_string(),
            "build".to_string(),
            "--call".to_string(),
            "targets,format=json".to_string(),
            "--build-arg".to_string(),
            format!("BUILDKIT_SYNTAX={}", frontend_image),
            "-f".to_string(),
            "-".to_string(),
            ".".to_string(),
        ];
        Self {
            command,
            stdin_payload: Some("{}".to_string()),
            timeout,
        }
    }

    /// Discovers buildable OS targets, in first-appearance order. Falls
    /// back to the static list when the live path fails in any way.
    pub async fn fetch(&self) -> Vec<String> {
        match self.discover().await {
            Ok(targets) => targets,
            Err(reason) => {
                tracing::warn!("Target discovery failed ({}), using fallback list", reason);
                fallback_targets()
            }
        }
    }

    async fn discover(&self) -> Result<Vec<String>, String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| "empty probe command".to_string())?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if self.stdin_payload.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out probe must not linger as a stray process.
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| format!("spawn failed: {}", e))?;

        if let Some(payload) = &self.stdin_payload {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(payload.as_bytes())
                    .await
                    .map_err(|e| format!("stdin write failed: {}", e))?;
            }
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| format!("timed out after {:?}", self.timeout))?
            .map_err(|e| format!("process error: {}", e))?;

        if !output.status.success() {
            return Err(format!(
                "exited with code {}",
                output.status.code().unwrap_or(-1)
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_targets(&stdout).ok_or_else(|| "no usable targets in output".to_string())
    }
}

/// Extracts bare OS names from a target listing: keeps entries ending in
/// the deps-only suffix, strips it, and dedupes preserving first
/// appearance. None means the output is unusable.
fn parse_targets(raw: &str) -> Option<Vec<String>> {
    let listing: TargetList = serde_json::from_str(raw).ok()?;
    let entries = listing.targets?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        if let Some(stripped) = entry.name.strip_suffix(DEPS_ONLY_TARGET_SUFFIX) {
            if !stripped.is_empty() && !names.iter().any(|n| n.as_str() == stripped) {
                names.push(stripped.to_string());
            }
        }
    }

    (!names.is_empty()).then_some(names)
}

/// Curated targets served when discovery is unavailable.
fn fallback_targets() -> Vec<String> {
    FALLBACK_TARGETS.iter().map(|s| s.to_string()).collect()
}
