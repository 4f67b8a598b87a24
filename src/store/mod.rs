//! Store Module
//!
//! Backends implementing the primitive operations the state layer needs.
//!
//! The [`Store`] trait is the injection seam: accessors and cache handles are
//! generic over it, so the Redis backend and the in-memory backend are
//! interchangeable.

mod entry;
mod memory;
mod redis;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::Entry;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// == Store Trait ==
/// The primitive remote operations against a key-value store.
///
/// `get` distinguishes a missing key (`Ok(None)`) from a store failure
/// (`Err`); the cache facade's refresh-on-miss path depends on that
/// distinction. Implementations must be safe for concurrent use.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    /// Reads the raw value at `key`; `Ok(None)` when the key is missing.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` at `key`. `Duration::ZERO` means the value never
    /// expires; any positive duration expires the key after it elapses.
    async fn set(&self, key: &str, value: String, expires: Duration) -> Result<()>;

    /// Adds `member` to the set at `key`, creating the set if absent.
    async fn sadd(&self, key: &str, member: &str) -> Result<()>;

    /// Removes `member` from the set at `key`.
    async fn srem(&self, key: &str, member: &str) -> Result<()>;

    /// Returns whether `member` is in the set at `key`.
    async fn sismember(&self, key: &str, member: &str) -> Result<bool>;

    /// Returns all members of the set at `key`; empty when the set is absent.
    async fn smembers(&self, key: &str) -> Result<Vec<String>>;
}
