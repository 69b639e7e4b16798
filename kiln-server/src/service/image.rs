//! Image launch
//!
//! Starts a detached container from a built image via `docker run -d` and
//! answers the short container id.

use thiserror::Error;
use tokio::process::Command;

/// Docker prints a 64-char container id; callers expect the CLI-style
/// 12-char prefix.
const SHORT_ID_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum ImageError {
    /// `docker run` could not be started
    #[error("failed to launch docker run: {0}")]
    Spawn(#[from] std::io::Error),

    /// `docker run` ran and reported failure
    #[error("docker run exited with code {code}: {stderr}")]
    Failed { code: i32, stderr: String },
}

/// Starts a detached container and returns its short id.
pub async fn start_container(image_name: &str) -> Result<String, ImageError> {
    let output = Command::new("docker")
        .args(["run", "-d", image_name])
        .output()
        .await?;

    if !output.status.success() {
        return Err(ImageError::Failed {
            code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    let full_id = String::from_utf8_lossy(&output.stdout);
    Ok(short_id(full_id.trim()))
}

/// First 12 characters of a container id, or the whole id when shorter.
fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}
