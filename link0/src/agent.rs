//! Catalog-facing agent types: records, teams, and creation requests.

use crate::id::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language-keyed text (`{"en": "...", "de": "..."}` on the wire).
///
/// The editor itself is language-agnostic — it only needs a display
/// string. [`LocalizedText::get`] falls back to `"en"`, then to any
/// available entry, so a record is never rendered blank just because
/// a translation is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    /// Create a single-language text.
    pub fn single(lang: impl Into<String>, text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(lang.into(), text.into());
        Self(map)
    }

    /// Look up a language, falling back to `"en"` and then to any entry.
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0
            .get(lang)
            .or_else(|| self.0.get("en"))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }

    /// True if no language has any text.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|t| t.trim().is_empty())
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        Self::single("en", text)
    }
}

/// How an agent is executed.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    /// An externally hosted HTTP service.
    External,
    /// A composite built from other agents; executed internally.
    Chain,
}

/// A cataloged agent, as returned by the catalog's lookup contract.
///
/// `input`/`output` are JSON-Schema documents and the `*_example`
/// fields are sample payloads; all four are optional because older
/// catalog entries predate the schema requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Catalog identifier.
    pub id: AgentId,
    /// Display title per language.
    pub title: LocalizedText,
    /// Description per language.
    #[serde(default)]
    pub description: LocalizedText,
    /// Declared input contract (JSON Schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    /// Sample input payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_example: Option<serde_json::Value>,
    /// Declared output contract (JSON Schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Sample output payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_example: Option<serde_json::Value>,
    /// Where the agent is invoked (`"internal"` for chain composites).
    #[serde(default)]
    pub agent_endpoint: String,
    /// External service or internally-executed chain.
    #[serde(rename = "type", default = "AgentKind::external")]
    pub kind: AgentKind,
    /// Chain configuration payload (chain-kind agents only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
    /// Credits charged per run.
    #[serde(default)]
    pub credits_per_run: u32,
    /// Community rating.
    #[serde(default)]
    pub stars: u32,
    /// Inline SVG icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_svg: Option<String>,
}

impl AgentKind {
    /// Serde default: catalog records are external unless marked.
    pub fn external() -> Self {
        AgentKind::External
    }
}

/// The ordered set of agents enabled for the current account.
///
/// Order matters: it is the cycling order for
/// [`crate::Chain::move_to_adjacent_team_agent`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Member agent IDs, in the account's configured order.
    pub members: Vec<AgentId>,
}

impl Team {
    /// Create a team from an ordered member list.
    pub fn new(members: Vec<AgentId>) -> Self {
        Self { members }
    }

    /// True if the agent is a team member.
    pub fn contains(&self, agent: &AgentId) -> bool {
        self.members.contains(agent)
    }

    /// The first member, if the team is non-empty.
    pub fn first(&self) -> Option<&AgentId> {
        self.members.first()
    }

    /// Position of the agent within the team order.
    pub fn position(&self, agent: &AgentId) -> Option<usize> {
        self.members.iter().position(|m| m == agent)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if the team has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A create-agent request body, submitted to the catalog when a chain
/// is published as a composite agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAgent {
    /// Display title per language.
    pub title: LocalizedText,
    /// Description per language.
    pub description: LocalizedText,
    /// Declared input contract (JSON Schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    /// Sample input payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_example: Option<serde_json::Value>,
    /// Declared output contract (JSON Schema).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    /// Sample output payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_example: Option<serde_json::Value>,
    /// Where the agent is invoked.
    pub agent_endpoint: String,
    /// External service or internally-executed chain.
    #[serde(rename = "type")]
    pub kind: AgentKind,
    /// Chain configuration payload (chain-kind agents only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<serde_json::Value>,
    /// Credits charged per run.
    pub credits_per_run: u32,
    /// Community rating (zero at creation).
    pub stars: u32,
    /// Inline SVG icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_svg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_text_prefers_exact_language() {
        let mut text = LocalizedText::single("en", "Hello");
        text.0.insert("de".into(), "Hallo".into());
        assert_eq!(text.get("de"), Some("Hallo"));
    }

    #[test]
    fn localized_text_falls_back_to_english() {
        let text = LocalizedText::single("en", "Hello");
        assert_eq!(text.get("fr"), Some("Hello"));
    }

    #[test]
    fn localized_text_falls_back_to_any_entry() {
        let text = LocalizedText::single("ja", "こんにちは");
        assert_eq!(text.get("en"), Some("こんにちは"));
    }

    #[test]
    fn agent_kind_serializes_lowercase() {
        let json = serde_json::to_string(&AgentKind::Chain).unwrap();
        assert_eq!(json, "\"chain\"");
    }

    #[test]
    fn agent_record_kind_defaults_to_external() {
        let record: AgentRecord = serde_json::from_value(serde_json::json!({
            "id": "a1",
            "title": {"en": "Agent One"},
        }))
        .unwrap();
        assert_eq!(record.kind, AgentKind::External);
    }

    #[test]
    fn team_position_follows_member_order() {
        let team = Team::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(team.position(&"b".into()), Some(1));
        assert_eq!(team.position(&"x".into()), None);
    }
}
