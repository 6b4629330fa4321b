//! Key-value snapshot storage.
//!
//! The session persists two string entries: the tree (`tree`) and the
//! selected node ID (`selected`). Hosts provide the backing store: browser
//! `localStorage` in the WASM bridge, `MemoryStore` in tests and tools.

use std::collections::HashMap;

/// Key holding the persisted tree JSON.
pub const TREE_KEY: &str = "tree";

/// Key holding the selected node ID.
pub const SELECTED_KEY: &str = "selected";

/// Flat string store. Writes are best-effort: a failing backend logs and
/// carries on.
pub trait SnapshotStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);

    /// Push buffered writes to the backend.
    fn flush(&mut self) {}
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if written by an earlier session.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Number of `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.entries.insert(key.to_string(), value.to_string());
    }
}
