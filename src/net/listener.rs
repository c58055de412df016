//! TCP listener and accept loop.
//!
//! # Responsibilities
//! - Bind the decoy address; bind failure is fatal at startup
//! - Accept connections until the shutdown signal fires
//! - Spawn one handler task per connection, never waiting on any of them
//! - Log accept errors and keep going

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::DecoyConfig;
use crate::net::connection::ConnectionTracker;
use crate::net::handler;

/// Error type for listener startup.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind or inspect the listening socket.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

/// A bound decoy listener.
///
/// Produced by [`Listener::bind`] and consumed by [`Listener::run`]; the
/// socket never sits in a partially-initialized field waiting for a start
/// hook.
pub struct Listener {
    inner: TcpListener,
    config: Arc<DecoyConfig>,
    tracker: ConnectionTracker,
}

impl Listener {
    /// Bind the configured address.
    pub async fn bind(config: Arc<DecoyConfig>) -> Result<Self, ListenerError> {
        let addr = config.listener.bind_address.clone();
        let inner = TcpListener::bind(&addr)
            .await
            .map_err(|source| ListenerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        let local_addr = inner
            .local_addr()
            .map_err(|source| ListenerError::Bind { addr, source })?;

        tracing::info!(address = %local_addr, "decoy listening");

        Ok(Self {
            inner,
            config,
            tracker: ConnectionTracker::new(),
        })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Handle on the tracker counting live connection handlers.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    /// Accept connections until the shutdown signal fires.
    ///
    /// Every accepted connection gets its own task immediately; the loop
    /// never waits on a handler and never caps the fan-out. A decoy wants
    /// every prober it can get, so there is no connection limit and no
    /// backpressure. Accept errors are logged and the loop continues; only
    /// shutdown ends it. Returning drops the socket, which unbinds the port.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("shutdown requested, listener closing");
                    break;
                }
                accepted = self.inner.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let guard = self.tracker.track();
                        tracing::debug!(
                            connection = %guard.id(),
                            peer = %peer,
                            active = self.tracker.active_count(),
                            "connection accepted"
                        );
                        let config = Arc::clone(&self.config);
                        let handler_shutdown = shutdown_rx.resubscribe();
                        tokio::spawn(handler::handle_connection(
                            stream,
                            guard,
                            config,
                            handler_shutdown,
                        ));
                    }
                    Err(error) => {
                        tracing::error!(%error, "failed to accept connection");
                    }
                }
            }
        }
    }
}
