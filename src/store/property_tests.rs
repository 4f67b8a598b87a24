//! Property-Based Tests for the Store Module
//!
//! Uses proptest to check the in-memory backend against a reference model
//! and to pin down the key-joining contract.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use proptest::prelude::*;

use crate::path;
use crate::store::{MemoryStore, Store};

// == Strategies ==
/// Generates store keys (non-empty, dot-free segments are covered by the
/// path properties separately)
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.]{1,32}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}"
}

/// A sequence of store operations replayed against both the backend and a
/// plain HashMap/HashSet model.
#[derive(Debug, Clone)]
enum StoreOp {
    Set { key: String, value: String },
    Get { key: String },
    SAdd { key: String, member: String },
    SRem { key: String, member: String },
    Contains { key: String, member: String },
    Members { key: String },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        key_strategy().prop_map(|key| StoreOp::Get { key }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, member)| StoreOp::SAdd { key, member }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, member)| StoreOp::SRem { key, member }),
        (key_strategy(), value_strategy())
            .prop_map(|(key, member)| StoreOp::Contains { key, member }),
        key_strategy().prop_map(|key| StoreOp::Members { key }),
    ]
}

fn run_async<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
        .block_on(fut)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence without expirations, the backend observes
    // exactly like a HashMap of values plus a HashMap of HashSets.
    #[test]
    fn prop_memory_store_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..40)) {
        let store = MemoryStore::new();
        let mut values: HashMap<String, String> = HashMap::new();
        let mut sets: HashMap<String, HashSet<String>> = HashMap::new();

        run_async(async {
            for op in ops {
                match op {
                    StoreOp::Set { key, value } => {
                        store.set(&key, value.clone(), Duration::ZERO).await.unwrap();
                        values.insert(key, value);
                    }
                    StoreOp::Get { key } => {
                        let actual = store.get(&key).await.unwrap();
                        prop_assert_eq!(actual.as_ref(), values.get(&key));
                    }
                    StoreOp::SAdd { key, member } => {
                        store.sadd(&key, &member).await.unwrap();
                        sets.entry(key).or_default().insert(member);
                    }
                    StoreOp::SRem { key, member } => {
                        store.srem(&key, &member).await.unwrap();
                        if let Some(model) = sets.get_mut(&key) {
                            model.remove(&member);
                        }
                    }
                    StoreOp::Contains { key, member } => {
                        let actual = store.sismember(&key, &member).await.unwrap();
                        let expected = sets.get(&key).is_some_and(|m| m.contains(&member));
                        prop_assert_eq!(actual, expected);
                    }
                    StoreOp::Members { key } => {
                        let mut actual = store.smembers(&key).await.unwrap();
                        actual.sort();
                        let mut expected: Vec<String> = sets
                            .get(&key)
                            .map(|m| m.iter().cloned().collect())
                            .unwrap_or_default();
                        expected.sort();
                        prop_assert_eq!(actual, expected);
                    }
                }
            }
            Ok(())
        })?;
    }

    // Values written without expiration are never dropped by a sweep.
    #[test]
    fn prop_purge_ignores_unexpiring_values(
        entries in prop::collection::hash_map(key_strategy(), value_strategy(), 1..20)
    ) {
        let store = MemoryStore::new();

        run_async(async {
            for (key, value) in &entries {
                store.set(key, value.clone(), Duration::ZERO).await.unwrap();
            }
        });

        prop_assert_eq!(store.purge_expired(), 0);
        prop_assert_eq!(store.len(), entries.len());
    }

    // Joining is associative concatenation with a dot: joining two joined
    // halves equals joining all segments at once. This is what makes the
    // collision behavior of dot-carrying segments a contract rather than
    // an accident.
    #[test]
    fn prop_path_join_is_flat(
        left in prop::collection::vec("[a-z0-9]{1,8}", 1..4),
        right in prop::collection::vec("[a-z0-9]{1,8}", 1..4),
    ) {
        let left_refs: Vec<&str> = left.iter().map(String::as_str).collect();
        let right_refs: Vec<&str> = right.iter().map(String::as_str).collect();

        let all: Vec<&str> = left_refs.iter().chain(right_refs.iter()).copied().collect();
        let joined_halves = format!("{}.{}", path::join(&left_refs), path::join(&right_refs));

        prop_assert_eq!(path::join(&all), joined_halves);
    }
}
