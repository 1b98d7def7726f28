//! Attribute Protocol (ATT) server core
//!
//! This module provides the server-side attribute table that backs a GATT
//! server: contiguous handle-indexed storage with O(1) exact lookup and
//! inclusive sub-range queries, plus an MTU-bounded writer for assembling
//! response payloads.

pub mod attribute;
pub mod constants;
pub mod dump;
pub mod error;
pub mod range;
pub mod writer;

// Re-export the public API
pub use self::attribute::{Attribute, AttributeValue, ValueHandler};
pub use self::constants::*;
pub use self::dump::{dump_attributes, log_attributes};
pub use self::error::{AttError, AttResult, ErrorCode};
pub use self::range::{AttributeRange, RangeBuilder};
pub use self::writer::ResponseWriter;
