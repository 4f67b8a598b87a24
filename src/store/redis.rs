//! Redis Store
//!
//! [`Store`] backend over a Redis connection manager. Every operation is a
//! single round-trip bounded by a fixed per-call timeout; a timed-out call
//! fails with [`StateError::Timeout`] and is never retried. The connection
//! manager multiplexes concurrent callers, so cloned handles share one
//! connection safely.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, StateError};
use crate::store::Store;

/// Default per-call operation timeout.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout applied to connection setup and the liveness probe.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Port assumed when the address carries none.
const DEFAULT_PORT: u16 = 6379;

// == Redis Store ==
/// Store backend addressed by host, optional credential, and a logical
/// database selector.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    // == Constructors ==
    /// Connects to the store and verifies liveness with a PING.
    ///
    /// Fails with [`StateError::Connection`] if the store cannot be reached
    /// or does not answer the probe within the connect timeout.
    ///
    /// # Arguments
    /// * `addr` - `host:port` of the store (empty falls back to localhost)
    /// * `password` - authentication credential, empty for none
    /// * `db` - logical database selector
    pub async fn connect(addr: &str, password: &str, db: i64) -> Result<Self> {
        Self::connect_with_timeout(addr, password, db, DEFAULT_OP_TIMEOUT).await
    }

    /// Connects using settings from a [`Config`].
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::connect_with_timeout(
            &config.addr,
            &config.password,
            config.db,
            config.op_timeout(),
        )
        .await
    }

    /// Connects with an explicit per-call operation timeout.
    pub async fn connect_with_timeout(
        addr: &str,
        password: &str,
        db: i64,
        op_timeout: Duration,
    ) -> Result<Self> {
        let (host, port) = split_addr(addr);
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host, port),
            redis: RedisConnectionInfo {
                db,
                password: (!password.is_empty()).then(|| password.to_string()),
                ..Default::default()
            },
        };

        let client =
            redis::Client::open(info).map_err(|e| StateError::Connection(e.to_string()))?;

        let mut conn = tokio::time::timeout(CONNECT_TIMEOUT, ConnectionManager::new(client))
            .await
            .map_err(|_| StateError::Timeout(CONNECT_TIMEOUT))?
            .map_err(|e| StateError::Connection(e.to_string()))?;

        // Liveness probe before handing the store to callers.
        let ping = redis::cmd("PING");
        let pong: String = tokio::time::timeout(CONNECT_TIMEOUT, ping.query_async(&mut conn))
            .await
            .map_err(|_| StateError::Timeout(CONNECT_TIMEOUT))?
            .map_err(|e| StateError::Connection(e.to_string()))?;
        debug!(addr, db, %pong, "connected to store");

        Ok(Self { conn, op_timeout })
    }

    /// Runs one command future under the per-call timeout.
    async fn bounded<T>(&self, fut: impl Future<Output = redis::RedisResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(StateError::from),
            Err(_) => Err(StateError::Timeout(self.op_timeout)),
        }
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        debug!(key, "GET");
        self.bounded(async move { conn.get::<_, Option<String>>(key).await })
            .await
    }

    async fn set(&self, key: &str, value: String, expires: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        debug!(key, ?expires, "SET");

        // Zero expiration means the key persists until overwritten.
        if expires.is_zero() {
            self.bounded(async move { conn.set::<_, _, ()>(key, value).await })
                .await
        } else {
            let ms = expires.as_millis() as u64;
            self.bounded(async move { conn.pset_ex::<_, _, ()>(key, value, ms).await })
                .await
        }
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        debug!(key, member, "SADD");
        self.bounded(async move { conn.sadd::<_, _, ()>(key, member).await })
            .await
    }

    async fn srem(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        debug!(key, member, "SREM");
        self.bounded(async move { conn.srem::<_, _, ()>(key, member).await })
            .await
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        debug!(key, member, "SISMEMBER");
        self.bounded(async move { conn.sismember::<_, _, bool>(key, member).await })
            .await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        debug!(key, "SMEMBERS");
        self.bounded(async move { conn.smembers::<_, Vec<String>>(key).await })
            .await
    }
}

// == Utility Functions ==
/// Splits `host:port`, falling back to localhost and the default port.
fn split_addr(addr: &str) -> (String, u16) {
    if addr.is_empty() {
        return ("127.0.0.1".to_string(), DEFAULT_PORT);
    }

    match addr.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host.to_string(), port),
            Err(_) => (addr.to_string(), DEFAULT_PORT),
        },
        None => (addr.to_string(), DEFAULT_PORT),
    }
}
