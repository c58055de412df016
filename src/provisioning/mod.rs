//! Startup provisioning of the host monitoring agent.
//!
//! # Responsibilities
//! - Fetch the monitoring-agent configuration file over HTTPS
//! - Write it to local storage
//! - Launch the agent executable pointing at that file and await its exit
//!
//! Best-effort by contract: every failure here is logged and swallowed, so a
//! broken download or a missing agent binary never keeps the decoy offline.
//! The caller additionally bounds the whole step with a timeout.

use thiserror::Error;
use tokio::process::Command;

use crate::config::schema::ProvisioningConfig;

#[derive(Debug, Error)]
enum ProvisioningError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("could not write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("could not launch {command}: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },
}

/// Run the provisioning step. Never fails the caller; the outcome is logged.
pub async fn run(config: &ProvisioningConfig) {
    if !config.enabled {
        tracing::debug!("provisioning disabled, skipping");
        return;
    }

    match provision(config).await {
        Ok(()) => tracing::info!("monitoring agent provisioned"),
        Err(error) => {
            tracing::error!(%error, "provisioning failed, starting listener without it");
        }
    }
}

async fn provision(config: &ProvisioningConfig) -> Result<(), ProvisioningError> {
    tracing::info!(url = %config.url, "downloading monitoring agent configuration");
    let body = reqwest::get(&config.url)
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    tokio::fs::write(&config.file_path, &body)
        .await
        .map_err(|source| ProvisioningError::Write {
            path: config.file_path.clone(),
            source,
        })?;

    tracing::info!(command = %config.command, "applying monitoring agent configuration");
    let status = Command::new(&config.command)
        .args(&config.args)
        .status()
        .await
        .map_err(|source| ProvisioningError::Launch {
            command: config.command.clone(),
            source,
        })?;

    if status.success() {
        tracing::info!("monitoring agent configuration applied");
    } else {
        tracing::warn!(code = ?status.code(), "monitoring agent exited with a failure code");
    }

    Ok(())
}
