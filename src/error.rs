//! Error types for the state layer
//!
//! Provides unified error handling using thiserror.
//!
//! Two error policies coexist: typed accessors are fail-soft and replace
//! every read error with a sentinel value, while connection setup and the
//! cache handle's non-miss read path surface these errors to the caller.

use std::time::Duration;

use thiserror::Error;

// == State Error Enum ==
/// Unified error type for the state layer.
#[derive(Error, Debug)]
pub enum StateError {
    /// Initial connection or liveness probe failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The backing store rejected or failed a command
    #[error("Store command failed: {0}")]
    Backend(#[from] redis::RedisError),

    /// A single round-trip exceeded the per-call timeout
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// A stored value could not be decoded as the requested type
    #[error("Value could not be decoded: {0}")]
    Decode(String),
}

// == Result Type Alias ==
/// Convenience Result type for the state layer.
pub type Result<T> = std::result::Result<T, StateError>;
