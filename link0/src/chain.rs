//! The Chain Model — an ordered sequence of agent invocations with
//! per-step connector configuration.
//!
//! Pure data plus invariants. No I/O lives here: everything that talks
//! to a backend belongs to [`crate::SimulationBackend`] and
//! [`crate::AgentCatalog`]; everything that reacts to edits belongs to
//! the editor session built on top of this model.
//!
//! Order is semantically significant: step *i*'s declared inputs are
//! expected to be satisfiable from the outputs of steps `0..i-1` plus
//! the original prompt. Duplicate agent references are permitted —
//! each step is an independent invocation even when agent IDs repeat.

use crate::agent::Team;
use crate::id::AgentId;
use serde::{Deserialize, Serialize};

/// How a step's effective input is derived from upstream output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorType {
    /// LLM-driven transform, specified in natural language.
    #[default]
    Magic,
    /// Explicit user-authored `transform(env)` function.
    Code,
}

/// Cycling direction for [`Chain::move_to_adjacent_team_agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start of the team order.
    Previous,
    /// Toward the end of the team order.
    Next,
}

/// One agent invocation within a chain.
///
/// `agent_id` is a weak reference into the externally-managed catalog:
/// a lookup key, not an owning pointer. Resolution failures are
/// repaired by [`Chain::repair`], never treated as fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStep {
    /// Catalog reference for the agent this step invokes.
    pub agent_id: AgentId,
    /// How this step's input is derived from upstream output.
    #[serde(default)]
    pub connector_type: ConnectorType,
    /// Natural-language transform instructions (magic connectors only).
    #[serde(default)]
    pub connector_prompt: String,
    /// Source of a `transform(env)` function (code connectors only).
    #[serde(default)]
    pub connector_js_code: String,
    /// Whether the connector panel has been opened at least once.
    ///
    /// This is a visited flag, nothing more: nothing ever validates
    /// connector content through it, and switching connector type
    /// leaves it untouched.
    #[serde(default)]
    pub connector_valid: bool,
}

impl ChainStep {
    /// Create a step with default connector configuration:
    /// magic transform, no prompt, no code, not yet visited.
    pub fn new(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            connector_type: ConnectorType::Magic,
            connector_prompt: String::new(),
            connector_js_code: String::new(),
            connector_valid: false,
        }
    }
}

/// An ordered composition of agent invocations.
///
/// The chain exclusively owns its steps; steps are never shared
/// between chains. Length may be zero (a chain under construction).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    steps: Vec<ChainStep>,
}

impl Chain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Create a chain from an existing step sequence.
    pub fn from_steps(steps: Vec<ChainStep>) -> Self {
        Self { steps }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps, in execution order.
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// The step at `index`, if in range.
    pub fn step(&self, index: usize) -> Option<&ChainStep> {
        self.steps.get(index)
    }

    /// Mutable access to the step at `index`, if in range.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut ChainStep> {
        self.steps.get_mut(index)
    }

    /// Consume the chain, returning its steps.
    pub fn into_steps(self) -> Vec<ChainStep> {
        self.steps
    }

    /// Append a step invoking `agent_id`, with default connector
    /// configuration. Duplicates are permitted. Returns the new
    /// step's index.
    pub fn append(&mut self, agent_id: AgentId) -> usize {
        self.steps.push(ChainStep::new(agent_id));
        self.steps.len() - 1
    }

    /// Remove the step at `index`, shifting subsequent steps left.
    /// Silent no-op when `index` is out of range.
    pub fn remove_at(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    /// Replace only the agent reference of the step at `index`;
    /// connector configuration is preserved. No-op when out of range.
    pub fn swap_agent(&mut self, index: usize, new_agent_id: AgentId) {
        if let Some(step) = self.steps.get_mut(index) {
            step.agent_id = new_agent_id;
        }
    }

    /// Replace the step's agent with the previous/next member of the
    /// team order, relative to the step's current agent.
    ///
    /// No-op at the team boundaries, when the index is out of range,
    /// or when the step's current agent is not a team member.
    /// Returns true if the agent changed.
    pub fn move_to_adjacent_team_agent(
        &mut self,
        index: usize,
        direction: Direction,
        team: &Team,
    ) -> bool {
        let Some(step) = self.steps.get_mut(index) else {
            return false;
        };
        let Some(pos) = team.position(&step.agent_id) else {
            return false;
        };
        let adjacent = match direction {
            Direction::Previous => pos.checked_sub(1),
            Direction::Next => Some(pos + 1),
        };
        match adjacent.and_then(|p| team.members.get(p)) {
            Some(agent) => {
                step.agent_id = agent.clone();
                true
            }
            None => false,
        }
    }

    /// The first team agent not yet referenced by any step, falling
    /// back to the first team member when every member is already in
    /// use. None only when the team is empty.
    pub fn next_available_agent(&self, team: &Team) -> Option<AgentId> {
        team.members
            .iter()
            .find(|member| !self.steps.iter().any(|s| &s.agent_id == *member))
            .or_else(|| team.first())
            .cloned()
    }

    /// Repair sweep: reassign every step whose agent is absent from
    /// the team to the team's first member. Models recovery from
    /// externally deleted agents — a repair, not a failure.
    ///
    /// Returns the indices that were reassigned. No-op when the team
    /// is empty (there is nothing valid to substitute).
    pub fn repair(&mut self, team: &Team) -> Vec<usize> {
        let Some(fallback) = team.first().cloned() else {
            return Vec::new();
        };
        let mut repaired = Vec::new();
        for (index, step) in self.steps.iter_mut().enumerate() {
            if !team.contains(&step.agent_id) {
                step.agent_id = fallback.clone();
                repaired.push(index);
            }
        }
        repaired
    }

    /// Ordered agent IDs of all steps strictly before `index` — the
    /// agents whose simulated outputs are available to that step.
    ///
    /// Purely positional: duplicate agent IDs contribute one entry per
    /// step.
    pub fn preceding_agents(&self, index: usize) -> Vec<AgentId> {
        self.steps
            .iter()
            .take(index)
            .map(|s| s.agent_id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(ids: &[&str]) -> Team {
        Team::new(ids.iter().map(|id| AgentId::from(*id)).collect())
    }

    fn chain_of(ids: &[&str]) -> Chain {
        Chain::from_steps(ids.iter().map(|id| ChainStep::new((*id).into())).collect())
    }

    #[test]
    fn append_defaults_to_blank_magic_connector() {
        let mut chain = Chain::new();
        let index = chain.append("a".into());
        let step = chain.step(index).unwrap();
        assert_eq!(step.connector_type, ConnectorType::Magic);
        assert!(step.connector_prompt.is_empty());
        assert!(step.connector_js_code.is_empty());
        assert!(!step.connector_valid);
    }

    #[test]
    fn append_permits_duplicates() {
        let mut chain = chain_of(&["a"]);
        chain.append("a".into());
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn remove_at_shrinks_by_one_and_preserves_order() {
        let mut chain = chain_of(&["a", "b", "c", "d"]);
        chain.remove_at(1);
        assert_eq!(chain.len(), 3);
        let order: Vec<&str> = chain.steps().iter().map(|s| s.agent_id.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "d"]);
    }

    #[test]
    fn remove_at_out_of_range_is_noop() {
        let mut chain = chain_of(&["a"]);
        chain.remove_at(5);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn swap_agent_preserves_connector_configuration() {
        let mut chain = chain_of(&["a"]);
        chain.step_mut(0).unwrap().connector_prompt = "extract the title".into();
        chain.swap_agent(0, "b".into());
        let step = chain.step(0).unwrap();
        assert_eq!(step.agent_id.as_str(), "b");
        assert_eq!(step.connector_prompt, "extract the title");
    }

    #[test]
    fn move_previous_at_first_team_position_is_idempotent_noop() {
        let team = team(&["a", "b", "c"]);
        let mut chain = chain_of(&["a"]);
        assert!(!chain.move_to_adjacent_team_agent(0, Direction::Previous, &team));
        let once = chain.step(0).unwrap().agent_id.clone();
        chain.move_to_adjacent_team_agent(0, Direction::Previous, &team);
        assert_eq!(chain.step(0).unwrap().agent_id, once);
        assert_eq!(once.as_str(), "a");
    }

    #[test]
    fn move_next_at_last_team_position_is_noop() {
        let team = team(&["a", "b"]);
        let mut chain = chain_of(&["b"]);
        assert!(!chain.move_to_adjacent_team_agent(0, Direction::Next, &team));
        assert_eq!(chain.step(0).unwrap().agent_id.as_str(), "b");
    }

    #[test]
    fn move_next_advances_in_team_order() {
        let team = team(&["a", "b", "c"]);
        let mut chain = chain_of(&["a"]);
        assert!(chain.move_to_adjacent_team_agent(0, Direction::Next, &team));
        assert_eq!(chain.step(0).unwrap().agent_id.as_str(), "b");
    }

    #[test]
    fn move_with_foreign_agent_is_noop() {
        let team = team(&["a", "b"]);
        let mut chain = chain_of(&["ghost"]);
        assert!(!chain.move_to_adjacent_team_agent(0, Direction::Next, &team));
    }

    #[test]
    fn next_available_agent_prefers_unused_member() {
        let team = team(&["a", "b", "c"]);
        let chain = chain_of(&["a", "c"]);
        assert_eq!(chain.next_available_agent(&team).unwrap().as_str(), "b");
    }

    #[test]
    fn next_available_agent_falls_back_to_first_member() {
        let team = team(&["a", "b"]);
        let chain = chain_of(&["a", "b"]);
        assert_eq!(chain.next_available_agent(&team).unwrap().as_str(), "a");
    }

    #[test]
    fn next_available_agent_none_for_empty_team() {
        let chain = chain_of(&["a"]);
        assert_eq!(chain.next_available_agent(&Team::default()), None);
    }

    #[test]
    fn repair_substitutes_first_team_member() {
        let team = team(&["a", "b"]);
        let mut chain = chain_of(&["a", "ghost", "b", "gone"]);
        let repaired = chain.repair(&team);
        assert_eq!(repaired, vec![1, 3]);
        assert!(chain.steps().iter().all(|s| team.contains(&s.agent_id)));
    }

    #[test]
    fn repair_with_empty_team_is_noop() {
        let mut chain = chain_of(&["ghost"]);
        let repaired = chain.repair(&Team::default());
        assert!(repaired.is_empty());
        assert_eq!(chain.step(0).unwrap().agent_id.as_str(), "ghost");
    }

    #[test]
    fn preceding_agents_is_strictly_before_index() {
        let chain = chain_of(&["a", "b", "c"]);
        let preceding = chain.preceding_agents(1);
        let names: Vec<&str> = preceding.iter().map(AgentId::as_str).collect();
        assert_eq!(names, vec!["a"]);
        assert!(chain.preceding_agents(0).is_empty());
    }

    #[test]
    fn preceding_agents_counts_duplicate_steps_independently() {
        let chain = chain_of(&["a", "a", "b"]);
        let preceding = chain.preceding_agents(2);
        assert_eq!(preceding.len(), 2);
        assert!(preceding.iter().all(|id| id.as_str() == "a"));
    }

    #[test]
    fn chain_step_serde_uses_camel_case() {
        let step = ChainStep::new("a".into());
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["agentId"], "a");
        assert_eq!(json["connectorType"], "magic");
        assert_eq!(json["connectorValid"], false);
    }
}
