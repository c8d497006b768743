//! Raw list persistence
//!
//! Each wheel owns one storage slot holding its list text exactly as typed.
//! Parsing happens on every load, so stored whitespace survives.

use std::collections::HashMap;

/// Durable string slots keyed by wheel storage key
pub trait ListStore {
    /// Previously saved text, if any
    fn load(&self, key: &str) -> Option<String>;
    /// Overwrite the slot
    fn save(&mut self, key: &str, raw_text: &str);
}

/// In-memory store (tests and the native demo)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ListStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.slots.get(key).cloned()
    }

    fn save(&mut self, key: &str, raw_text: &str) {
        self.slots.insert(key.to_owned(), raw_text.to_owned());
    }
}

/// `window.localStorage` (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - lists will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl ListStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn save(&mut self, key: &str, raw_text: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, raw_text).is_err() {
                log::warn!("Failed to save list '{}'", key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip_and_overwrite() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("wheel_students"), None);

        store.save("wheel_students", " Ada \n\nGrace");
        assert_eq!(store.load("wheel_students").as_deref(), Some(" Ada \n\nGrace"));

        store.save("wheel_students", "Linus");
        assert_eq!(store.load("wheel_students").as_deref(), Some("Linus"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_slots_are_independent() {
        let mut store = MemoryStore::new();
        store.save("wheel_students", "a");
        store.save("wheel_objects", "b");
        assert_eq!(store.load("wheel_students").as_deref(), Some("a"));
        assert_eq!(store.load("wheel_objects").as_deref(), Some("b"));
    }
}
