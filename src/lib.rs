//! Decoy network listener.
//!
//! A honeypot service: it accepts TCP connections on a port that runs no real
//! service, fingerprints what the connecting client tried to speak, logs the
//! attempt, and answers with a plausible canned reply.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!                 │                 DECOY LISTENER                 │
//!                 │                                               │
//!   Probe ───────▶│  net/listener ──▶ net/handler                 │
//!                 │                      │                        │
//!                 │                      ▼                        │
//!                 │            fingerprint/classifier             │
//!                 │                      │                        │
//!                 │                      ▼                        │
//!   Reply ◀───────│            fingerprint/responder              │
//!                 │                                               │
//!                 │  ┌─────────────────────────────────────────┐  │
//!                 │  │          Cross-Cutting Concerns          │  │
//!                 │  │  config    lifecycle    provisioning     │  │
//!                 │  └─────────────────────────────────────────┘  │
//!                 └───────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod fingerprint;
pub mod lifecycle;
pub mod net;
pub mod provisioning;

pub use config::DecoyConfig;
pub use lifecycle::Shutdown;
pub use net::Listener;
