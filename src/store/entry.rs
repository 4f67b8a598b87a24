//! Store Entry Module
//!
//! A single in-memory value with optional expiration.

use std::time::{Duration, Instant};

// == Entry ==
/// A stored value and its expiration deadline.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: String,
    /// Expiration deadline, None = no expiration
    pub expires_at: Option<Instant>,
}

impl Entry {
    /// Creates a new entry.
    ///
    /// `Duration::ZERO` means the entry never expires; this mirrors the
    /// backing store's convention of "zero expiration = no timeout".
    pub fn new(value: String, expires: Duration) -> Self {
        let expires_at = if expires.is_zero() {
            None
        } else {
            Some(Instant::now() + expires)
        };

        Self { value, expires_at }
    }

    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its deadline;
    /// entries without a deadline never expire.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}
