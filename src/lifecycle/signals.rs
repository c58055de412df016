//! OS signal handling.
//!
//! Translates SIGINT and SIGTERM into the shutdown broadcast. There is no
//! SIGHUP reload story: the decoy's config is immutable and a restart is
//! cheap.

use crate::lifecycle::shutdown::Shutdown;

/// Wait for a termination signal, then trigger shutdown.
///
/// Meant to run as its own task for the lifetime of the process.
pub async fn listen_for_signals(shutdown: Shutdown) {
    wait_for_termination().await;
    tracing::info!("termination signal received, shutting down");
    shutdown.trigger();
}

#[cfg(unix)]
async fn wait_for_termination() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(error) => {
            tracing::warn!(%error, "could not install SIGTERM handler, watching ctrl-c only");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_termination() {
    let _ = tokio::signal::ctrl_c().await;
}
