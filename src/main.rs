//! Decoy listener service entrypoint.
//!
//! Wiring order matters: provisioning runs (best-effort, bounded) before the
//! listener binds, and the listener binds before signals can stop anything
//! worth stopping.

use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decoy_listener::config;
use decoy_listener::lifecycle::{signals, Shutdown};
use decoy_listener::net::Listener;
use decoy_listener::provisioning;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decoy_listener=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("decoy-listener v0.1.0 starting");

    let config = Arc::new(config::load_default()?);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        io_timeout_ms = config.timeouts.io_ms,
        probe_bytes = config.probe.max_bytes,
        "configuration loaded"
    );

    // Best-effort and bounded: a hung download must never keep the decoy
    // offline.
    let provisioning_budget = Duration::from_secs(config.timeouts.provisioning_secs);
    if tokio::time::timeout(provisioning_budget, provisioning::run(&config.provisioning))
        .await
        .is_err()
    {
        tracing::warn!("provisioning did not finish in time, starting listener without it");
    }

    let listener = Listener::bind(Arc::clone(&config)).await?;
    let tracker = listener.tracker();

    let shutdown = Shutdown::new();
    tokio::spawn(signals::listen_for_signals(shutdown.clone()));

    listener.run(shutdown.subscribe()).await;

    let drain_window = Duration::from_secs(config.timeouts.drain_secs);
    if !tracker.drain(drain_window).await {
        tracing::warn!(
            active = tracker.active_count(),
            "connections still open after drain deadline"
        );
    }

    tracing::info!("shutdown complete");
    Ok(())
}
