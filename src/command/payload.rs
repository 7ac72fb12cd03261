//! Shared payload passed unchanged to every command in a sequence.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Key/value context shared by all commands of one sequence run.
///
/// The executor hands the same `Arc<CommandPayload>` to every command it
/// starts; commands read and write entries to communicate with each other.
/// There is no other command-to-command data channel.
#[derive(Debug, Default)]
pub struct CommandPayload {
    entries: RwLock<HashMap<String, Value>>,
}

impl CommandPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value under `key`, returning the previous value if present.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.write().insert(key.into(), value)
    }

    /// Fetch a clone of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    /// Remove and return the value stored under `key`.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
