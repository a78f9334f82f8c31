//! The editing session: one chain, one open connector, one draft slot.

use crate::publish::{can_publish, composite_definition};
use link0::{
    connector_state, effective_prompt, AgentCatalog, AgentId, AgentRecord, CatalogError, Chain,
    ChainDraft, CodegenOutcome, ConnectorState, ConnectorType, Direction, DraftStore, EvalError,
    RunId, SimulatedEnvironment, SimulationBackend, SimulationError, StepSession, Team,
    TransformEvaluator, TransformOutcome, CHAIN_DRAFT_SLOT,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the editing session.
///
/// Transform refusals computed by the backend are not here — those
/// come back as [`TransformOutcome::Failed`] / [`CodegenOutcome::Failed`]
/// values, rendered inline and always retryable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EditorError {
    /// The action needs an open connector, and none is open.
    #[error("no connector is open")]
    NoSelection,

    /// The given step index does not exist.
    #[error("step {0} does not exist")]
    StepOutOfRange(usize),

    /// Generate Code is locked until a test succeeds for the open step.
    #[error("run a successful test before generating code")]
    TestRequired,

    /// Title, description, or step count does not meet the publish bar.
    #[error("a chain needs a title, a description, and at least two steps to publish")]
    NotPublishable,

    /// A boundary agent of the chain no longer resolves in the catalog.
    #[error("cannot resolve the chain's {which} agent: {agent}")]
    BoundaryAgentMissing {
        /// `"first"` or `"last"`.
        which: &'static str,
        /// The unresolved reference.
        agent: AgentId,
    },

    /// Catalog failure.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Simulation failure (transport/decode level).
    #[error("simulation error: {0}")]
    Simulation(#[from] SimulationError),

    /// Local evaluation failure.
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// A chain editing session.
///
/// Owns the chain exclusively for its lifetime. Every model mutation
/// is mirrored into the draft slot so an abandoned session can be
/// resumed; the mirror is best-effort and never blocks an edit.
pub struct ChainSession {
    catalog: Arc<dyn AgentCatalog>,
    backend: Arc<dyn SimulationBackend>,
    drafts: Arc<dyn DraftStore>,
    evaluator: Arc<dyn TransformEvaluator>,
    team: Team,
    chain: Chain,
    prompt_text: String,
    selected: Option<usize>,
    step_session: StepSession,
}

impl ChainSession {
    /// Open a session: fetch the team, restore the draft slot (or
    /// start fresh, seeded with the first team agent), and run the
    /// repair sweep.
    ///
    /// A missing or unreadable draft is recovered silently; a failed
    /// team fetch is surfaced, since nothing useful can be edited
    /// without knowing the team.
    pub async fn open(
        catalog: Arc<dyn AgentCatalog>,
        backend: Arc<dyn SimulationBackend>,
        drafts: Arc<dyn DraftStore>,
        evaluator: Arc<dyn TransformEvaluator>,
    ) -> Result<Self, EditorError> {
        let team = catalog.team().await?;

        let draft = match drafts.load(CHAIN_DRAFT_SLOT).await {
            Ok(Some(value)) => match serde_json::from_value::<ChainDraft>(value) {
                Ok(draft) => draft,
                Err(e) => {
                    tracing::warn!(error = %e, "draft slot held unparseable data, starting fresh");
                    ChainDraft::default()
                }
            },
            Ok(None) => ChainDraft::default(),
            Err(e) => {
                tracing::warn!(error = %e, "draft load failed, starting fresh");
                ChainDraft::default()
            }
        };
        let (mut chain, prompt_text) = draft.restore();

        if chain.is_empty() {
            if let Some(first) = team.first() {
                chain.append(first.clone());
            }
        }
        let repaired = chain.repair(&team);
        if !repaired.is_empty() {
            tracing::warn!(
                steps = ?repaired,
                "reassigned steps whose agents left the team"
            );
        }

        let session = Self {
            catalog,
            backend,
            drafts,
            evaluator,
            team,
            chain,
            prompt_text,
            selected: None,
            step_session: StepSession::default(),
        };
        session.autosave().await;
        Ok(session)
    }

    // ── read access ────────────────────────────────────────────────

    /// The chain being edited.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// The cached team view.
    pub fn team(&self) -> &Team {
        &self.team
    }

    /// The chain-wide prompt text.
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// Index of the step whose connector is open, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Connector state of the step at `index`. Steps other than the
    /// open one carry no transient test record.
    pub fn state_of(&self, index: usize) -> Option<ConnectorState> {
        let session = if self.selected == Some(index) {
            self.step_session
        } else {
            StepSession::default()
        };
        self.chain
            .step(index)
            .map(|step| connector_state(step, &session))
    }

    /// Whether Generate Code is unlocked for the open step.
    pub fn can_generate(&self) -> bool {
        self.step_session.can_generate()
    }

    /// Whether the publish action is enabled for the given metadata.
    pub fn can_publish(&self, title: &str, description: &str) -> bool {
        can_publish(title, description, &self.chain)
    }

    // ── chain mutations (each mirrors the draft) ───────────────────

    /// Set the chain-wide prompt text.
    pub async fn set_prompt_text(&mut self, prompt: impl Into<String>) {
        self.prompt_text = prompt.into();
        self.autosave().await;
    }

    /// Append a step, preferring a team agent not yet in the chain.
    /// Returns the new step's index, or None when the team is empty.
    pub async fn append_step(&mut self) -> Option<usize> {
        let agent = self.chain.next_available_agent(&self.team)?;
        let index = self.chain.append(agent);
        self.autosave().await;
        Some(index)
    }

    /// Remove the step at `index`. Clears the open-connector pointer
    /// if it referenced the removed step, and re-points it when it
    /// referenced a later one.
    pub async fn remove_step(&mut self, index: usize) {
        if index >= self.chain.len() {
            return;
        }
        self.chain.remove_at(index);
        match self.selected {
            Some(sel) if sel == index => {
                self.selected = None;
                self.step_session = StepSession::default();
            }
            Some(sel) if sel > index => self.selected = Some(sel - 1),
            _ => {}
        }
        self.autosave().await;
    }

    /// Replace the agent of the step at `index`; connector
    /// configuration is preserved.
    pub async fn swap_agent(&mut self, index: usize, agent: AgentId) {
        self.chain.swap_agent(index, agent);
        self.autosave().await;
    }

    /// Cycle the step's agent to the previous/next team member.
    pub async fn cycle_agent(&mut self, index: usize, direction: Direction) {
        if self
            .chain
            .move_to_adjacent_team_agent(index, direction, &self.team)
        {
            self.autosave().await;
        }
    }

    /// Change the step's connector type. The visited flag is left
    /// untouched — it tracks panel visits, not content.
    pub async fn set_connector_type(&mut self, index: usize, connector_type: ConnectorType) {
        if let Some(step) = self.chain.step_mut(index) {
            step.connector_type = connector_type;
            self.autosave().await;
        }
    }

    /// Update the step's magic transform instructions.
    pub async fn set_connector_prompt(&mut self, index: usize, prompt: impl Into<String>) {
        if let Some(step) = self.chain.step_mut(index) {
            step.connector_prompt = prompt.into();
            self.autosave().await;
        }
    }

    /// Update the step's transform source.
    pub async fn set_connector_code(&mut self, index: usize, code: impl Into<String>) {
        if let Some(step) = self.chain.step_mut(index) {
            step.connector_js_code = code.into();
            self.autosave().await;
        }
    }

    /// Refetch the team and repair steps referencing departed agents.
    pub async fn refresh_team(&mut self) -> Result<(), EditorError> {
        self.team = self.catalog.team().await?;
        let repaired = self.chain.repair(&self.team);
        if !repaired.is_empty() {
            tracing::warn!(steps = ?repaired, "reassigned steps whose agents left the team");
            self.autosave().await;
        }
        Ok(())
    }

    // ── connector panel ────────────────────────────────────────────

    /// Open the connector panel for the step at `index`: marks the
    /// step visited (`connector_valid`), makes it the single selected
    /// step, and resets the transient test record.
    pub async fn open_connector(&mut self, index: usize) -> Result<(), EditorError> {
        let Some(step) = self.chain.step_mut(index) else {
            return Err(EditorError::StepOutOfRange(index));
        };
        step.connector_valid = true;
        self.selected = Some(index);
        self.step_session = StepSession::default();
        self.autosave().await;
        Ok(())
    }

    /// Close the connector panel, discarding the transient test
    /// record. The simulated environment is never persisted.
    pub fn close_connector(&mut self) {
        self.selected = None;
        self.step_session = StepSession::default();
    }

    /// Preview the data environment available to the open step.
    /// Read-only: the chain is not touched.
    pub async fn environment(&self) -> Result<SimulatedEnvironment, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        let step = self
            .chain
            .step(index)
            .ok_or(EditorError::StepOutOfRange(index))?;
        let preceding = self.chain.preceding_agents(index);
        let env = self
            .backend
            .simulate_environment(
                &step.agent_id,
                effective_prompt(&self.prompt_text),
                &preceding,
            )
            .await?;
        Ok(env)
    }

    /// Run a transform test for the open step. A successful outcome
    /// unlocks Generate Code; a failed one is returned for inline
    /// display and changes nothing.
    ///
    /// `run` selects a recorded live run for code connectors; magic
    /// connectors ignore it.
    pub async fn run_test(&mut self, run: Option<&RunId>) -> Result<TransformOutcome, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        let step = self
            .chain
            .step(index)
            .ok_or(EditorError::StepOutOfRange(index))?;

        let outcome = match step.connector_type {
            ConnectorType::Magic => {
                let preceding = self.chain.preceding_agents(index);
                self.backend
                    .test_magic_transform(
                        &step.agent_id,
                        effective_prompt(&self.prompt_text),
                        &preceding,
                        &step.connector_prompt,
                    )
                    .await?
            }
            ConnectorType::Code => {
                self.backend
                    .test_code_transform(&step.agent_id, run)
                    .await?
            }
        };

        // Only credit the step that is still open.
        if outcome.succeeded() && self.selected == Some(index) {
            self.step_session.tested = true;
        }
        Ok(outcome)
    }

    /// Compile the open step's magic transform into code. Locked
    /// behind a successful test. On success the generated source is
    /// installed and the connector becomes a code connector — the
    /// durable, auditable artifact; magic is the authoring aid.
    /// On failure the step is left untouched.
    pub async fn generate_code(&mut self) -> Result<CodegenOutcome, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        if !self.step_session.can_generate() {
            return Err(EditorError::TestRequired);
        }
        let step = self
            .chain
            .step(index)
            .ok_or(EditorError::StepOutOfRange(index))?;
        let preceding = self.chain.preceding_agents(index);
        let outcome = self
            .backend
            .generate_code(
                &step.agent_id,
                effective_prompt(&self.prompt_text),
                &preceding,
                &step.connector_prompt,
            )
            .await?;
        if let CodegenOutcome::Success { code } = &outcome {
            self.install_code(index, code.clone()).await;
        }
        Ok(outcome)
    }

    /// Derive a starter transformer from the live/synthetic
    /// environment, for code steps with nothing to compile yet.
    /// Installs on success, exactly like [`Self::generate_code`].
    pub async fn generate_starter_transformer(
        &mut self,
        run: Option<&RunId>,
    ) -> Result<CodegenOutcome, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        let step = self
            .chain
            .step(index)
            .ok_or(EditorError::StepOutOfRange(index))?;
        let outcome = self
            .backend
            .generate_transformer_from_env(&step.agent_id, run)
            .await?;
        if let CodegenOutcome::Success { code } = &outcome {
            self.install_code(index, code.clone()).await;
        }
        Ok(outcome)
    }

    /// Run the open step's transform source through the sandboxed
    /// evaluator against an explicit input.
    pub async fn evaluate_code_locally(
        &self,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, EditorError> {
        let index = self.selected.ok_or(EditorError::NoSelection)?;
        let step = self
            .chain
            .step(index)
            .ok_or(EditorError::StepOutOfRange(index))?;
        let value = self
            .evaluator
            .evaluate(&step.connector_js_code, input)
            .await?;
        Ok(value)
    }

    // ── publish ────────────────────────────────────────────────────

    /// Publish the chain as a composite agent.
    ///
    /// Resolves the boundary agents (both must exist), derives the
    /// composite's input contract from the first and its output
    /// contract from the last, submits the chain-type definition, and
    /// clears the draft slot. The draft survives any failure — no
    /// work is lost to a failed publish.
    pub async fn publish(
        &mut self,
        title: &str,
        description: &str,
        icon_svg: Option<String>,
    ) -> Result<AgentRecord, EditorError> {
        if !can_publish(title, description, &self.chain) {
            return Err(EditorError::NotPublishable);
        }

        let first_id = self.chain.steps()[0].agent_id.clone();
        let last_id = self.chain.steps()[self.chain.len() - 1].agent_id.clone();
        let first = self.resolve_boundary("first", &first_id).await?;
        let last = self.resolve_boundary("last", &last_id).await?;

        let definition = composite_definition(
            title,
            description,
            icon_svg,
            &first,
            &last,
            &self.chain,
            &self.prompt_text,
        );
        let created = self.catalog.create_agent(definition).await?;

        if let Err(e) = self.drafts.clear(CHAIN_DRAFT_SLOT).await {
            tracing::warn!(error = %e, "draft clear after publish failed");
        }
        // Refresh the cached team view so the new composite shows up;
        // best-effort, the publish itself already succeeded.
        match self.catalog.team().await {
            Ok(team) => self.team = team,
            Err(e) => tracing::warn!(error = %e, "team refresh after publish failed"),
        }
        Ok(created)
    }

    async fn resolve_boundary(
        &self,
        which: &'static str,
        id: &AgentId,
    ) -> Result<AgentRecord, EditorError> {
        match self.catalog.agent(id).await? {
            Some(record) => Ok(record),
            None => Err(EditorError::BoundaryAgentMissing {
                which,
                agent: id.clone(),
            }),
        }
    }

    async fn install_code(&mut self, index: usize, code: String) {
        if let Some(step) = self.chain.step_mut(index) {
            step.connector_js_code = code;
            step.connector_type = ConnectorType::Code;
        }
        self.step_session.generated = true;
        self.autosave().await;
    }

    /// Mirror the chain + prompt into the draft slot. Best-effort:
    /// the slot holds only the chain shape, so a lost write costs at
    /// most the latest keystroke, never consistency.
    async fn autosave(&self) {
        let snapshot = match serde_json::to_value(ChainDraft::snapshot(&self.chain, &self.prompt_text)) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "draft snapshot failed");
                return;
            }
        };
        if let Err(e) = self.drafts.save(CHAIN_DRAFT_SLOT, snapshot).await {
            tracing::warn!(error = %e, "draft save failed");
        }
    }
}
