//! Key/value slot storage consumed by the game engine.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::db::StoreError;

/// Durable key/value storage for game slots.
///
/// `load` is called once per slot when a session opens, `save` after every
/// mutating operation and `clear` on reset. Values are opaque strings.
pub trait SlotStore {
    /// Reads a slot. `Ok(None)` means the slot is absent.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a slot, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a slot entirely. Clearing an absent slot is not an error.
    fn clear(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: SlotStore + ?Sized> SlotStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).save(key, value)
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).clear(key)
    }
}

/// In-memory slot store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots currently held.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot is held.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl SlotStore for MemoryStore {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(bytes = value.len(), "Saving slot");
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_until_saved() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load("a").unwrap(), None);
        store.save("a", "1").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_save_replaces() {
        let mut store = MemoryStore::new();
        store.save("a", "1").unwrap();
        store.save("a", "2").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = MemoryStore::new();
        store.save("a", "1").unwrap();
        store.clear("a").unwrap();
        store.clear("never-saved").unwrap();
        assert_eq!(store.load("a").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let mut store: Box<dyn SlotStore> = Box::new(MemoryStore::new());
        store.save("a", "1").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("1"));
    }
}
