//! attcore - A Rust library for Bluetooth ATT attribute tables
//!
//! This library provides the server-side core of the Attribute Protocol:
//! a contiguous handle-indexed attribute table with constant-time lookup
//! and inclusive sub-range queries, plus an MTU-bounded response writer
//! for value handlers to fill. PDU parsing and request dispatch live a
//! layer above and build on these types.

pub mod att;
pub mod uuid;

// Re-export common types for convenience
pub use att::{
    Attribute, AttributeRange, AttributeValue, AttError, AttResult, ErrorCode, RangeBuilder,
    ResponseWriter, ValueHandler,
};
pub use uuid::Uuid;

// Handlers that serve long-running reads poll this to notice a dropped
// connection or a server shutdown.
pub use tokio_util::sync::CancellationToken;
