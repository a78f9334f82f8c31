//! MemoryDraft — HashMap-backed DraftStore for testing.

use crate::draft::DraftStore;
use crate::error::DraftError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory draft store backed by a `HashMap` behind a `RwLock`.
pub struct MemoryDraft {
    slots: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryDraft {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Pre-seed a slot (simulates a draft left by an earlier session).
    pub fn seeded(slot: &str, value: serde_json::Value) -> Self {
        let store = Self::new();
        store.slots.write().unwrap().insert(slot.to_owned(), value);
        store
    }
}

impl Default for MemoryDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStore for MemoryDraft {
    async fn load(&self, slot: &str) -> Result<Option<serde_json::Value>, DraftError> {
        Ok(self.slots.read().unwrap().get(slot).cloned())
    }

    async fn save(&self, slot: &str, value: serde_json::Value) -> Result<(), DraftError> {
        self.slots.write().unwrap().insert(slot.to_owned(), value);
        Ok(())
    }

    async fn clear(&self, slot: &str) -> Result<(), DraftError> {
        self.slots.write().unwrap().remove(slot);
        Ok(())
    }
}
