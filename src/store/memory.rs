//! In-Memory Store
//!
//! Hermetic [`Store`] backend with the same observable contract as the Redis
//! backend: string values with expiration plus string sets. Used by the test
//! suite and usable as a local stand-in when no external store is available.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::store::{Entry, Store};

// == Memory Store ==
/// In-process key-value store with lazy expiration.
///
/// Expired values are dropped on read; [`MemoryStore::purge_expired`] sweeps
/// the rest on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    values: HashMap<String, Entry>,
    sets: HashMap<String, HashSet<String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes all expired values, returning the number removed.
    pub fn purge_expired(&self) -> usize {
        let mut inner = self.lock();
        let before = inner.values.len();
        inner.values.retain(|_, entry| !entry.is_expired());
        before - inner.values.len()
    }

    /// Number of live value keys (sets not included).
    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner
            .values
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    /// Returns true if no live value keys exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means another thread panicked mid-operation;
        // the map itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut inner = self.lock();

        let expired = inner.values.get(key).is_some_and(Entry::is_expired);
        if expired {
            inner.values.remove(key);
            return Ok(None);
        }

        Ok(inner.values.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: String, expires: Duration) -> Result<()> {
        let mut inner = self.lock();
        inner.values.insert(key.to_string(), Entry::new(value, expires));
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut inner = self.lock();
        inner
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn srem(&self, key: &str, member: &str) -> Result<()> {
        let mut inner = self.lock();
        if let Some(members) = inner.sets.get_mut(key) {
            members.remove(member);
        }
        Ok(())
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let inner = self.lock();
        Ok(inner
            .sets
            .get(key)
            .is_some_and(|members| members.contains(member)))
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let inner = self.lock();
        Ok(inner
            .sets
            .get(key)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default())
    }
}
