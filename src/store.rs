//! State store contract consumed by `database` nodes and `action:set_state`.
//!
//! Generated code talks to the store through the `store` handle supplied by
//! the dispatcher (`store.get(key)`, `store.set(key, value)`, ...). The Rust
//! side of that contract is [`StateStore`]; [`MemoryStore`] is the in-process
//! implementation hosts use for local runs and tests. Consistency between
//! concurrent invocations is the store's concern (the memory store is
//! last-write-wins).

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The operations a plugin may perform against the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOp {
    #[default]
    Get,
    Set,
    Delete,
    List,
    Exists,
}

impl StoreOp {
    /// Method name on the runtime `store` handle.
    pub fn method(&self) -> &'static str {
        match self {
            StoreOp::Get => "get",
            StoreOp::Set => "set",
            StoreOp::Delete => "delete",
            StoreOp::List => "list",
            StoreOp::Exists => "exists",
        }
    }

    /// Whether the operation takes a value argument.
    pub fn takes_value(&self) -> bool {
        matches!(self, StoreOp::Set)
    }

    /// Whether the operation produces a result worth binding.
    pub fn has_result(&self) -> bool {
        !matches!(self, StoreOp::Set)
    }
}

pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    /// Returns whether the key existed.
    fn delete(&self, key: &str) -> bool;
    /// Keys starting with `prefix`, sorted.
    fn list(&self, prefix: &str) -> Vec<String>;
    fn exists(&self, key: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn list(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();
        keys.sort();
        keys
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
