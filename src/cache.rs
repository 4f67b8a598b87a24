//! Cache Facade Module
//!
//! Expiring reads and writes with lazy refresh-on-miss.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::accessor::Source;
use crate::error::{Result, StateError};
use crate::path;
use crate::store::Store;
use crate::value::StateValue;

impl<S: Store> Source<S> {
    /// Creates a refresh-on-miss cache handle at `path`.
    ///
    /// `expires` applies to every write through the handle, including the
    /// write-back after a refresh; `Duration::ZERO` means values never
    /// expire. `refresh` computes the fallback value when the key is missing.
    pub fn cache<T, F>(&self, path: &[&str], expires: Duration, refresh: F) -> CacheHandle<S, T, F>
    where
        T: StateValue,
        F: Fn() -> T + Send + Sync,
    {
        CacheHandle {
            store: self.store(),
            key: path::join(path),
            expires,
            refresh,
            gate: Mutex::new(()),
            _value: PhantomData,
        }
    }
}

// == Cache Handle ==
/// Get/set pair bound to one key and expiration, with a caller-supplied
/// refresh function invoked on a miss.
///
/// Unlike the typed accessors, reads through a cache handle are fail-loud
/// except for the miss itself: a missing key is recovered by computing
/// `refresh()` and writing the result back, while any other store error
/// propagates to the caller. The refresh path is gated by a mutex so
/// concurrent `get`s on one handle run `refresh` once; separate handles
/// bound to the same key can still refresh independently.
pub struct CacheHandle<S, T, F> {
    store: Arc<S>,
    key: String,
    expires: Duration,
    refresh: F,
    gate: Mutex<()>,
    _value: PhantomData<T>,
}

impl<S, T, F> CacheHandle<S, T, F>
where
    S: Store,
    T: StateValue,
    F: Fn() -> T + Send + Sync,
{
    /// The joined store key this handle is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Writes `value` with the handle's expiration.
    pub async fn set(&self, value: T) -> Result<()> {
        self.store.set(&self.key, value.encode(), self.expires).await
    }

    /// Reads the cached value, refreshing it on a miss.
    ///
    /// On a miss the freshly computed value is returned even if the
    /// write-back fails; the write error is logged and swallowed.
    pub async fn get(&self) -> Result<T> {
        if let Some(raw) = self.store.get(&self.key).await? {
            return Self::decode(&self.key, &raw);
        }

        let _guard = self.gate.lock().await;

        // A concurrent getter may have refreshed while we waited on the gate.
        if let Some(raw) = self.store.get(&self.key).await? {
            return Self::decode(&self.key, &raw);
        }

        debug!(key = %self.key, "miss, refreshing");
        let value = (self.refresh)();
        if let Err(err) = self.set(value.clone()).await {
            warn!(key = %self.key, error = %err, "write-back after refresh failed");
        }

        Ok(value)
    }

    fn decode(key: &str, raw: &str) -> Result<T> {
        T::decode(raw).ok_or_else(|| StateError::Decode(format!("{key}: {raw:?}")))
    }
}
