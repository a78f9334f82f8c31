//! The Draft boundary — the durable client-side slot that keeps an
//! in-progress chain alive across accidental navigation or reloads.

use crate::chain::{Chain, ChainStep};
use crate::error::DraftError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The fixed slot the chain editor mirrors its state into.
pub const CHAIN_DRAFT_SLOT: &str = "chain-editor-draft";

/// The persisted shape of an in-progress chain: the step sequence
/// plus the shared prompt text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainDraft {
    /// The chain's steps, in order.
    pub agents: Vec<ChainStep>,
    /// The chain-wide prompt seeding step 0's environment.
    #[serde(default)]
    pub prompt: String,
}

impl ChainDraft {
    /// Snapshot a chain and its prompt.
    pub fn snapshot(chain: &Chain, prompt: &str) -> Self {
        Self {
            agents: chain.steps().to_vec(),
            prompt: prompt.to_owned(),
        }
    }

    /// Restore the chain and prompt from this draft.
    pub fn restore(self) -> (Chain, String) {
        (Chain::from_steps(self.agents), self.prompt)
    }
}

/// Boundary ③ — Drafts
///
/// A keyed blob store with load/save/clear. Saves are fire-and-forget
/// from the editor's point of view: a failed save is logged and the
/// edit continues. The slot only ever holds the chain shape, never
/// network results, so a save racing a failed publish cannot corrupt
/// anything.
///
/// Implementations:
/// - `MemoryDraft` (test-utils and `synapse-draft-memory`)
/// - `FsDraft` (`synapse-draft-fs`: one JSON file per slot)
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Read the slot. `Ok(None)` when nothing has been saved.
    async fn load(&self, slot: &str) -> Result<Option<serde_json::Value>, DraftError>;

    /// Write the slot, overwriting any previous value.
    async fn save(&self, slot: &str, value: serde_json::Value) -> Result<(), DraftError>;

    /// Delete the slot. No-op when the slot is empty.
    async fn clear(&self, slot: &str) -> Result<(), DraftError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ConnectorType;

    #[test]
    fn snapshot_restore_round_trips() {
        let mut chain = Chain::new();
        chain.append("a".into());
        chain.append("b".into());
        chain.step_mut(1).unwrap().connector_type = ConnectorType::Code;
        chain.step_mut(1).unwrap().connector_js_code = "function transform(env) {}".into();

        let draft = ChainDraft::snapshot(&chain, "Summarize this article");
        let json = serde_json::to_value(&draft).unwrap();
        let back: ChainDraft = serde_json::from_value(json).unwrap();
        let (restored, prompt) = back.restore();

        assert_eq!(restored, chain);
        assert_eq!(prompt, "Summarize this article");
    }

    #[test]
    fn draft_wire_shape_is_agents_list() {
        let mut chain = Chain::new();
        chain.append("a".into());
        let json = serde_json::to_value(ChainDraft::snapshot(&chain, "")).unwrap();
        assert!(json["agents"].is_array());
        assert_eq!(json["agents"][0]["agentId"], "a");
    }

    #[test]
    fn draft_without_prompt_field_still_parses() {
        let draft: ChainDraft = serde_json::from_value(serde_json::json!({
            "agents": [{"agentId": "a"}],
        }))
        .unwrap();
        assert_eq!(draft.agents.len(), 1);
        assert!(draft.prompt.is_empty());
    }
}
