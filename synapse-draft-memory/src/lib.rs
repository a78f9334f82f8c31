#![deny(missing_docs)]
//! In-memory implementation of link0's DraftStore trait.
//!
//! Uses a `HashMap` behind a `RwLock` for concurrent access. Suitable
//! for testing, prototyping, and sessions where drafts do not need to
//! survive a restart.

use async_trait::async_trait;
use link0::draft::DraftStore;
use link0::error::DraftError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory draft store backed by a `HashMap` behind a `RwLock`.
pub struct MemoryDraftStore {
    slots: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryDraftStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, slot: &str) -> Result<Option<serde_json::Value>, DraftError> {
        let slots = self.slots.read().await;
        Ok(slots.get(slot).cloned())
    }

    async fn save(&self, slot: &str, value: serde_json::Value) -> Result<(), DraftError> {
        let mut slots = self.slots.write().await;
        slots.insert(slot.to_owned(), value);
        Ok(())
    }

    async fn clear(&self, slot: &str) -> Result<(), DraftError> {
        let mut slots = self.slots.write().await;
        slots.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use link0::draft::CHAIN_DRAFT_SLOT;
    use serde_json::json;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryDraftStore::new();
        store
            .save(CHAIN_DRAFT_SLOT, json!({"agents": [{"agentId": "a"}]}))
            .await
            .unwrap();
        let loaded = store.load(CHAIN_DRAFT_SLOT).await.unwrap();
        assert_eq!(loaded, Some(json!({"agents": [{"agentId": "a"}]})));
    }

    #[tokio::test]
    async fn load_empty_slot_returns_none() {
        let store = MemoryDraftStore::new();
        assert!(store.load("nothing-here").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_previous_value() {
        let store = MemoryDraftStore::new();
        store.save("slot", json!(1)).await.unwrap();
        store.save("slot", json!(2)).await.unwrap();
        assert_eq!(store.load("slot").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn clear_empties_the_slot() {
        let store = MemoryDraftStore::new();
        store.save("slot", json!(1)).await.unwrap();
        store.clear("slot").await.unwrap();
        assert!(store.load("slot").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_missing_slot_is_ok() {
        let store = MemoryDraftStore::new();
        assert!(store.clear("missing").await.is_ok());
    }

    #[test]
    fn memory_store_implements_draft_store() {
        fn _assert_draft_store<T: DraftStore>() {}
        _assert_draft_store::<MemoryDraftStore>();
    }
}
