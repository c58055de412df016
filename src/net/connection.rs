//! Per-connection identity and lifetime tracking.
//!
//! # Responsibilities
//! - Assign each accepted connection a unique ID for log correlation
//! - Count live handlers so shutdown can wait for them to drain
//! - Record when each connection was accepted

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Global counter for connection IDs.
/// Relaxed ordering is enough: only uniqueness matters, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate the next unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Counts live connection handlers.
///
/// The accept loop takes one [`ConnectionGuard`] per spawned handler; the
/// guard decrements the count on drop, so the count stays correct even when a
/// handler panics. Shutdown uses [`ConnectionTracker::drain`] to wait for
/// in-flight probes to finish.
#[derive(Debug, Clone)]
pub struct ConnectionTracker {
    active_count: Arc<AtomicU64>,
}

impl ConnectionTracker {
    /// Create a new tracker with no live connections.
    pub fn new() -> Self {
        Self {
            active_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a new live connection. The returned guard decrements the count
    /// when dropped.
    pub fn track(&self) -> ConnectionGuard {
        self.active_count.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            active_count: Arc::clone(&self.active_count),
            id: ConnectionId::new(),
            opened_at: Instant::now(),
        }
    }

    /// Current number of live connection handlers.
    pub fn active_count(&self) -> u64 {
        self.active_count.load(Ordering::SeqCst)
    }

    /// Wait until every handler has finished or the deadline passes.
    /// Returns `true` if the tracker drained in time.
    pub async fn drain(&self, deadline: Duration) -> bool {
        let started = Instant::now();
        while self.active_count.load(Ordering::SeqCst) > 0 {
            if started.elapsed() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        true
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard tying one handler's lifetime to the tracker count.
#[derive(Debug)]
pub struct ConnectionGuard {
    active_count: Arc<AtomicU64>,
    id: ConnectionId,
    opened_at: Instant,
}

impl ConnectionGuard {
    /// This connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Time since the connection was accepted.
    pub fn elapsed(&self) -> Duration {
        self.opened_at.elapsed()
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active_count.fetch_sub(1, Ordering::SeqCst);
        tracing::trace!(connection = %self.id, "handler finished");
    }
}
