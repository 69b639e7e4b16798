//! Build process supervision
//!
//! One task per build: materialize the scratch directory, spawn the
//! planned process, pump both output streams into the shared record, and
//! settle the record exactly once after the process is gone. Both pumps
//! are joined before the terminal transition, so a poll that observes
//! `completed` or `failed` always sees the full log.

use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use uuid::Uuid;

use kiln_core::domain::build::BuildRecord;

use crate::service::invocation::{BuildPlan, MANIFEST_FILE_NAME};

/// Runs one build to completion and settles its record.
pub async fn supervise(id: Uuid, record: Arc<Mutex<BuildRecord>>, plan: BuildPlan) {
    let scratch_dir = plan.scratch.as_ref().map(|scratch| scratch.dir.clone());

    let outcome = execute(id, &record, plan).await;

    // Removal precedes the terminal transition: a record observed as
    // settled implies the scratch directory is already gone.
    if let Some(dir) = scratch_dir {
        if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Build {}: failed to remove scratch dir {}: {}",
                    id,
                    dir.display(),
                    e
                );
            }
        }
    }

    let mut record = record.lock().unwrap();
    match outcome {
        Ok(status) if status.success() => {
            tracing::info!("Build {} completed", id);
            record.complete();
        }
        Ok(status) => {
            let code = status.code().unwrap_or(-1);
            tracing::warn!("Build {} exited with code {}", id, code);
            record.fail(format!("Exited with code {}", code));
        }
        Err(message) => {
            tracing::error!("Build {} failed to run: {}", id, message);
            record.fail(message);
        }
    }
}

/// Spawns the planned process and waits for it, returning its exit status
/// or the reason it never ran. Output pumps are awaited before returning.
async fn execute(
    id: Uuid,
    record: &Arc<Mutex<BuildRecord>>,
    plan: BuildPlan,
) -> Result<ExitStatus, String> {
    if let Some(scratch) = &plan.scratch {
        tokio::fs::create_dir_all(&scratch.dir)
            .await
            .map_err(|e| format!("failed to create scratch dir: {}", e))?;
        tokio::fs::write(scratch.dir.join(MANIFEST_FILE_NAME), &scratch.manifest)
            .await
            .map_err(|e| format!("failed to write build manifest: {}", e))?;
    }

    tracing::debug!("Build {}: spawning {} {:?}", id, plan.program, plan.args);

    let mut child = Command::new(&plan.program)
        .args(&plan.args)
        .envs(plan.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| e.to_string())?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "failed to capture stdout".to_string())?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| "failed to capture stderr".to_string())?;

    let out_pump = tokio::spawn(pump(stdout, record.clone()));
    let err_pump = tokio::spawn(pump(stderr, record.clone()));

    let status = child
        .wait()
        .await
        .map_err(|e| format!("failed to wait for build process: {}", e));

    // The streams close once the process is gone, so these finish promptly.
    let _ = out_pump.await;
    let _ = err_pump.await;

    status
}

/// Copies one output stream into the record, chunk by chunk, in arrival
/// order. Stream origin is not tagged; stdout and stderr interleave.
async fn pump<R>(mut reader: R, record: Arc<Mutex<BuildRecord>>)
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let chunk = String::from_utf8_lossy(&buf[..n]).into_owned();
                record.lock().unwrap().push_chunk(chunk);
            }
        }
    }
}
