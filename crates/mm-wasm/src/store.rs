//! Browser `localStorage` behind the editor's `SnapshotStore`.

use mm_editor::store::{MemoryStore, SnapshotStore};

/// `localStorage` when the browser grants it, memory otherwise (private
/// mode, sandboxed iframes, native test builds).
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
    fallback: MemoryStore,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = Self::local_storage();
        if storage.is_none() {
            log::warn!("localStorage unavailable, state will not survive a reload");
        }
        Self {
            storage,
            fallback: MemoryStore::new(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn local_storage() -> Option<web_sys::Storage> {
        None
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }
}

impl SnapshotStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        match &self.storage {
            Some(storage) => storage.get_item(key).ok().flatten(),
            None => self.fallback.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match &self.storage {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    log::warn!("localStorage write to `{key}` failed: {e:?}");
                }
            }
            None => self.fallback.set(key, value),
        }
    }
}
