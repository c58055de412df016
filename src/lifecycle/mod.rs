//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → provision (best-effort, bounded) → bind → accept
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs)
//!         → shutdown.rs broadcast
//!         → accept loop exits, in-flight reads/writes unblock
//!         → drain with deadline → exit
//! ```
//!
//! # Design Decisions
//! - One broadcast channel reaches the accept loop and every handler
//! - Shutdown has a deadline: handlers still open after the drain window
//!   are abandoned, not waited on forever

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
