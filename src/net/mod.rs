//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind + accept loop, one task per connection)
//!     → connection.rs (IDs, live-handler tracking)
//!     → handler.rs (read probe → classify → respond → close)
//! ```
//!
//! # Design Decisions
//! - No connection cap: a decoy wants every prober it can get
//! - Handlers share nothing; the shutdown broadcast is their only link
//! - Every handler closes its own connection exactly once

pub mod connection;
pub mod handler;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use listener::{Listener, ListenerError};
