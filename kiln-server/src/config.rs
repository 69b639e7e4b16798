//! Server configuration
//!
//! Everything comes from environment variables with extension-friendly
//! defaults, so the backend container runs with no configuration at all.

use std::path::PathBuf;
use std::time::Duration;

use crate::service::DEFAULT_FRONTEND_IMAGE;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Unix socket the extension host connects through
    pub socket_path: PathBuf,

    /// Directory holding the built UI bundle
    pub public_dir: PathBuf,

    /// Dalec frontend image driving builds and target discovery
    pub frontend_image: String,

    /// Upper bound on one target discovery attempt
    pub probe_timeout: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SOCKET_PATH (optional, default: /run/guest-services/backend.sock)
    /// - PUBLIC_DIR (optional, default: ./public)
    /// - DALEC_FRONTEND (optional, default: the upstream frontend image)
    /// - PROBE_TIMEOUT (optional, seconds, default: 10)
    pub fn from_env() -> Self {
        let socket_path = std::env::var("SOCKET_PATH")
            .unwrap_or_else(|_| "/run/guest-services/backend.sock".to_string())
            .into();

        let public_dir = std::env::var("PUBLIC_DIR")
            .unwrap_or_else(|_| "./public".to_string())
            .into();

        let frontend_image =
            std::env::var("DALEC_FRONTEND").unwrap_or_else(|_| DEFAULT_FRONTEND_IMAGE.to_string());

        let probe_timeout = std::env::var("PROBE_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Self {
            socket_path,
            public_dir,
            frontend_image,
            probe_timeout,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.socket_path.as_os_str().is_empty() {
            anyhow::bail!("socket_path cannot be empty");
        }

        if self.frontend_image.is_empty() {
            anyhow::bail!("frontend_image cannot be empty");
        }

        if self.probe_timeout.is_zero() {
            anyhow::bail!("probe_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: "/run/guest-services/backend.sock".into(),
            public_dir: "./public".into(),
            frontend_image: DEFAULT_FRONTEND_IMAGE.to_string(),
            probe_timeout: Duration::from_secs(10),
        }
    }
}
