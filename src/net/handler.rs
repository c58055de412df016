//! Per-connection decoy protocol.
//!
//! # Responsibilities
//! - Read one probe under the I/O timeout and the shutdown signal
//! - Classify the probe and send back the matching canned reply
//! - Discriminate I/O failures before logging them
//! - Close the connection exactly once, on every path

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio::time::timeout;

use crate::config::DecoyConfig;
use crate::fingerprint::{classify, response_for, Classification};
use crate::net::connection::ConnectionGuard;

/// Endpoint string used when the peer address cannot be read.
const UNKNOWN_ENDPOINT: &str = "Unknown";

/// How a socket operation on the decoy connection failed.
///
/// Discriminated at the I/O boundary so logging never has to inspect wrapped
/// error internals.
#[derive(Debug)]
enum IoFailure {
    /// Service shutdown unblocked the call; normal termination, not an error.
    Cancelled,
    /// The peer reset or closed its end mid-operation.
    PeerClosed,
    /// The per-connection I/O timeout fired.
    Timeout,
    /// Any other socket failure.
    Other(std::io::Error),
}

impl IoFailure {
    fn from_io(error: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match error.kind() {
            ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe => IoFailure::PeerClosed,
            _ => IoFailure::Other(error),
        }
    }
}

/// Drive one accepted connection through the read/classify/respond protocol.
///
/// Never returns an error and never panics past its own frames: every failure
/// is logged, and the stream is shut down before the task finishes. Dropping
/// the guard afterwards releases the connection slot in the tracker.
pub async fn handle_connection(
    mut stream: TcpStream,
    guard: ConnectionGuard,
    config: Arc<DecoyConfig>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let endpoint = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| UNKNOWN_ENDPOINT.to_owned());
    let id = guard.id();

    tracing::info!(connection = %id, %endpoint, "connection received");

    if let Err(failure) = exchange(&mut stream, &endpoint, &config, &mut shutdown_rx).await {
        match failure {
            IoFailure::Cancelled => {
                tracing::debug!(connection = %id, %endpoint, "cancelled by shutdown");
            }
            IoFailure::PeerClosed => {
                tracing::info!(connection = %id, %endpoint, "peer closed the connection");
            }
            IoFailure::Timeout => {
                tracing::info!(connection = %id, %endpoint, "peer went silent, timing out");
            }
            IoFailure::Other(error) => {
                tracing::error!(connection = %id, %endpoint, %error, "connection failed");
            }
        }
    }

    // Runs on every path above, success or failure.
    let _ = stream.shutdown().await;
    tracing::info!(
        connection = %id,
        %endpoint,
        elapsed_ms = guard.elapsed().as_millis() as u64,
        "connection closed"
    );
}

/// The single read/classify/respond round.
async fn exchange(
    stream: &mut TcpStream,
    endpoint: &str,
    config: &DecoyConfig,
    shutdown_rx: &mut broadcast::Receiver<()>,
) -> Result<Classification, IoFailure> {
    let io_timeout = Duration::from_millis(config.timeouts.io_ms);
    let mut buf = vec![0u8; config.probe.max_bytes];

    let read = bounded_io(io_timeout, shutdown_rx, stream.read(&mut buf)).await?;
    if read == 0 {
        tracing::warn!(%endpoint, "empty probe, likely a port scan");
        return Ok(Classification::EmptyProbe);
    }

    let probe = String::from_utf8_lossy(&buf[..read]);
    let classification = classify(&probe);
    tracing::info!(
        %endpoint,
        %classification,
        payload = %escape_payload(&probe),
        "probe classified"
    );

    let reply = response_for(classification);
    if !reply.is_empty() {
        bounded_io(io_timeout, shutdown_rx, stream.write_all(&reply)).await?;
        tracing::debug!(%endpoint, reply_bytes = reply.len(), "reply written");
    }

    Ok(classification)
}

/// Run one socket operation under the I/O timeout and the shutdown signal,
/// folding the outcome into an [`IoFailure`].
///
/// The timeout protects the handler from a slow or silent peer; the shutdown
/// branch makes service stop reach every in-flight read and write.
async fn bounded_io<T>(
    io_timeout: Duration,
    shutdown_rx: &mut broadcast::Receiver<()>,
    op: impl Future<Output = std::io::Result<T>>,
) -> Result<T, IoFailure> {
    tokio::select! {
        _ = shutdown_rx.recv() => Err(IoFailure::Cancelled),
        completed = timeout(io_timeout, op) => match completed {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(IoFailure::from_io(error)),
            Err(_) => Err(IoFailure::Timeout),
        },
    }
}

/// Escape control characters for logging, so a probe containing `\r\n` shows
/// up in the log line as the literal `\r\n`.
fn escape_payload(payload: &str) -> String {
    payload
        .chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}
