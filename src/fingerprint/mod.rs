//! Protocol fingerprinting subsystem.
//!
//! # Data Flow
//! ```text
//! Probe bytes (single bounded read)
//!     → classifier.rs (ordered signature rules)
//!     → Classification
//!     → responder.rs (fixed reply table)
//!     → reply bytes, or silence
//! ```
//!
//! # Design Decisions
//! - Classification is a total pure function over the probe; it never fails
//! - Rule order is explicit: the exact scanner signature outranks the
//!   generic HTTP method check
//! - Scanner probes and empty probes get no reply at all

pub mod classifier;
pub mod responder;

pub use classifier::{classify, Classification};
pub use responder::response_for;
