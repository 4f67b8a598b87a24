//! Typed Accessor Module
//!
//! Bound getter/setter handles for a single path and primitive type.
//!
//! Accessors are fail-soft by contract: a missing key, an unreachable store,
//! and a value that does not decode all yield the type's sentinel (`""`, `-1`,
//! `-1.0`, `false`), and write errors are swallowed. Callers treat these
//! handles as best-effort mirrors of external state and are not expected to
//! branch on errors. The `try_` variants expose the explicit form for callers
//! that must tell a stored sentinel apart from a miss.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::error::{Result, StateError};
use crate::path;
use crate::store::Store;
use crate::value::StateValue;

// == Source ==
/// Produces typed accessors bound to dot-joined path keys.
///
/// The backing store is injected at construction and shared by every handle
/// the source produces; dropping the last handle releases the connection.
pub struct Source<S> {
    store: Arc<S>,
}

impl<S> Clone for Source<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> Source<S> {
    /// Creates a source over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    // == Typed Accessors ==
    /// String accessor for `path`; writes persist until overwritten.
    pub fn string(&self, path: &[&str]) -> Accessor<S, String> {
        self.accessor(path, Duration::ZERO)
    }

    /// Integer accessor for `path`; reads default to `-1` on any error.
    pub fn int(&self, path: &[&str]) -> Accessor<S, i64> {
        self.accessor(path, Duration::ZERO)
    }

    /// Float accessor for `path`; reads default to `-1.0` on any error.
    pub fn float(&self, path: &[&str]) -> Accessor<S, f64> {
        self.accessor(path, Duration::ZERO)
    }

    /// Boolean accessor for `path`; reads default to `false` on any error.
    pub fn boolean(&self, path: &[&str]) -> Accessor<S, bool> {
        self.accessor(path, Duration::ZERO)
    }

    /// Set-collection accessor for `path`.
    pub fn set(&self, path: &[&str]) -> SetAccessor<S> {
        SetAccessor {
            store: Arc::clone(&self.store),
            key: path::join(path),
        }
    }

    // == Expiration-Bound Accessors ==
    /// Like [`Source::string`], but every write attaches `expires`.
    /// `Duration::ZERO` means writes never expire.
    pub fn cached_string(&self, expires: Duration, path: &[&str]) -> Accessor<S, String> {
        self.accessor(path, expires)
    }

    /// Like [`Source::int`], but every write attaches `expires`.
    pub fn cached_int(&self, expires: Duration, path: &[&str]) -> Accessor<S, i64> {
        self.accessor(path, expires)
    }

    /// Like [`Source::float`], but every write attaches `expires`.
    pub fn cached_float(&self, expires: Duration, path: &[&str]) -> Accessor<S, f64> {
        self.accessor(path, expires)
    }

    /// Like [`Source::boolean`], but every write attaches `expires`.
    pub fn cached_bool(&self, expires: Duration, path: &[&str]) -> Accessor<S, bool> {
        self.accessor(path, expires)
    }

    fn accessor<T: StateValue>(&self, path: &[&str], expires: Duration) -> Accessor<S, T> {
        Accessor {
            store: Arc::clone(&self.store),
            key: path::join(path),
            expires,
            _value: PhantomData,
        }
    }

    pub(crate) fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }
}

// == Accessor ==
/// A bound getter/setter pair for one path and type.
pub struct Accessor<S, T> {
    store: Arc<S>,
    key: String,
    expires: Duration,
    _value: PhantomData<T>,
}

impl<S, T> Clone for Accessor<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            expires: self.expires,
            _value: PhantomData,
        }
    }
}

impl<S: Store, T: StateValue> Accessor<S, T> {
    /// The joined store key this accessor is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fail-soft read; returns the type's sentinel on any error.
    pub async fn get(&self) -> T {
        match self.try_get().await {
            Ok(Some(value)) => value,
            Ok(None) => T::sentinel(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "read failed, returning sentinel");
                T::sentinel()
            }
        }
    }

    /// Explicit read: `Ok(None)` on a missing key, `Err` on a store failure
    /// or a value that does not decode as `T`.
    pub async fn try_get(&self) -> Result<Option<T>> {
        match self.store.get(&self.key).await? {
            Some(raw) => match T::decode(&raw) {
                Some(value) => Ok(Some(value)),
                None => Err(StateError::Decode(format!("{}: {:?}", self.key, raw))),
            },
            None => Ok(None),
        }
    }

    /// Fail-soft write; errors are logged and swallowed.
    pub async fn set(&self, value: T) {
        if let Err(err) = self.try_set(value).await {
            warn!(key = %self.key, error = %err, "write failed");
        }
    }

    /// Explicit write with the accessor's expiration.
    pub async fn try_set(&self, value: T) -> Result<()> {
        self.store.set(&self.key, value.encode(), self.expires).await
    }
}

// == Set Accessor ==
/// Bound operations over a string-set collection.
///
/// All operations are fail-soft: `contains` defaults to `false` and `members`
/// to an empty sequence when the store cannot be reached.
pub struct SetAccessor<S> {
    store: Arc<S>,
    key: String,
}

impl<S> Clone for SetAccessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
        }
    }
}

impl<S: Store> SetAccessor<S> {
    /// The joined store key this accessor is bound to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Adds `member` to the set.
    pub async fn add(&self, member: &str) {
        if let Err(err) = self.store.sadd(&self.key, member).await {
            warn!(key = %self.key, error = %err, "set add failed");
        }
    }

    /// Removes `member` from the set.
    pub async fn remove(&self, member: &str) {
        if let Err(err) = self.store.srem(&self.key, member).await {
            warn!(key = %self.key, error = %err, "set remove failed");
        }
    }

    /// Returns whether `member` is in the set; `false` on any error.
    pub async fn contains(&self, member: &str) -> bool {
        match self.store.sismember(&self.key, member).await {
            Ok(found) => found,
            Err(err) => {
                warn!(key = %self.key, error = %err, "membership check failed");
                false
            }
        }
    }

    /// Returns all set members; empty on any error.
    pub async fn members(&self) -> Vec<String> {
        match self.store.smembers(&self.key).await {
            Ok(members) => members,
            Err(err) => {
                warn!(key = %self.key, error = %err, "member listing failed");
                Vec::new()
            }
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn source() -> Source<MemoryStore> {
        Source::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_string_round_trip() {
        let src = source();
        let name = src.string(&["user", "1", "name"]);

        name.set("alice".to_string()).await;
        assert_eq!(name.get().await, "alice");
        assert_eq!(name.key(), "user.1.name");
    }

    #[tokio::test]
    async fn test_int_round_trip() {
        let src = source();
        let count = src.int(&["stats", "count"]);

        count.set(42).await;
        assert_eq!(count.get().await, 42);
    }

    #[tokio::test]
    async fn test_float_round_trip() {
        let src = source();
        let ratio = src.float(&["stats", "ratio"]);

        ratio.set(2.5).await;
        assert_eq!(ratio.get().await, 2.5);
    }

    #[tokio::test]
    async fn test_bool_round_trip() {
        let src = source();
        let flag = src.boolean(&["feature", "enabled"]);

        flag.set(true).await;
        assert!(flag.get().await);

        flag.set(false).await;
        assert!(!flag.get().await);
    }

    #[tokio::test]
    async fn test_sentinels_on_missing_keys() {
        let src = source();

        assert_eq!(src.string(&["missing"]).get().await, "");
        assert_eq!(src.int(&["missing"]).get().await, -1);
        assert_eq!(src.float(&["missing"]).get().await, -1.0);
        assert!(!src.boolean(&["missing"]).get().await);
    }

    #[tokio::test]
    async fn test_sentinel_on_decode_failure() {
        let src = source();

        // A string written where an int is read: same fail-soft outcome as
        // a missing key.
        src.string(&["cfg", "limit"]).set("garbage".to_string()).await;
        assert_eq!(src.int(&["cfg", "limit"]).get().await, -1);
    }

    #[tokio::test]
    async fn test_try_get_distinguishes_miss_from_decode_failure() {
        let src = source();

        assert!(matches!(src.int(&["missing"]).try_get().await, Ok(None)));

        src.string(&["cfg", "limit"]).set("garbage".to_string()).await;
        let result = src.int(&["cfg", "limit"]).try_get().await;
        assert!(matches!(result, Err(StateError::Decode(_))));
    }

    #[tokio::test]
    async fn test_stored_sentinel_is_observable_via_try_get() {
        let src = source();
        let count = src.int(&["count"]);

        count.set(-1).await;

        // get() cannot tell this apart from a miss; try_get can.
        assert_eq!(count.get().await, -1);
        assert!(matches!(count.try_get().await, Ok(Some(-1))));
    }

    #[tokio::test]
    async fn test_set_membership_scenario() {
        let src = source();
        let team = src.set(&["team", "a"]);

        assert!(!team.contains("7").await);

        team.add("7").await;
        assert!(team.contains("7").await);

        team.remove("7").await;
        assert!(!team.contains("7").await);
    }

    #[tokio::test]
    async fn test_set_members_listing() {
        let src = source();
        let team = src.set(&["team", "a"]);

        assert!(team.members().await.is_empty());

        team.add("7").await;
        team.add("9").await;

        let mut members = team.members().await;
        members.sort();
        assert_eq!(members, vec!["7".to_string(), "9".to_string()]);
    }

    #[tokio::test]
    async fn test_plain_setter_does_not_expire() {
        let src = source();
        let name = src.string(&["persistent"]);

        name.set("value".to_string()).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(name.get().await, "value");
    }

    #[tokio::test]
    async fn test_cached_accessor_expires() {
        let src = source();
        let token = src.cached_string(Duration::from_millis(20), &["session", "token"]);

        token.set("abc".to_string()).await;
        assert_eq!(token.get().await, "abc");

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(token.get().await, "");
    }

    #[tokio::test]
    async fn test_cached_accessor_zero_expiration_never_expires() {
        let src = source();
        let token = src.cached_int(Duration::ZERO, &["session", "ttl"]);

        token.set(9).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(token.get().await, 9);
    }

    #[tokio::test]
    async fn test_accessors_share_the_store() {
        let src = source();

        src.string(&["shared"]).set("x".to_string()).await;
        assert_eq!(src.clone().string(&["shared"]).get().await, "x");
    }
}
