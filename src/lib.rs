//! Redstate - typed accessors over an external key-value store
//!
//! Exposes bound getter/setter pairs for primitive values addressed by
//! hierarchical path segments, plus a caching facade with expiration and lazy
//! refresh-on-miss. All state lives in the backing store; this crate holds no
//! state of its own beyond the parameters baked into each handle.

pub mod accessor;
pub mod cache;
pub mod config;
pub mod error;
pub mod path;
pub mod store;
pub mod value;

pub use accessor::{Accessor, SetAccessor, Source};
pub use cache::CacheHandle;
pub use config::Config;
pub use error::{Result, StateError};
pub use store::{MemoryStore, RedisStore, Store};
pub use value::StateValue;
