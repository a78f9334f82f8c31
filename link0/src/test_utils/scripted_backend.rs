//! ScriptedBackend — canned simulation responses with call recording.

use crate::error::SimulationError;
use crate::id::{AgentId, ExecutionId, RunId};
use crate::simulation::{
    CodegenOutcome, FlowEntry, SimulatedEnvironment, SimulationBackend, TransformOutcome,
};
use async_trait::async_trait;
use std::sync::RwLock;

/// One recorded call against the scripted backend, with the exact
/// request shape the caller sent. Tests assert on these instead of
/// standing up an HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// `simulate_environment` was called.
    Environment {
        /// Step agent under test.
        agent: AgentId,
        /// Prompt as sent.
        prompt: String,
        /// Preceding agents as sent, order preserved.
        preceding: Vec<AgentId>,
    },
    /// `test_magic_transform` was called.
    MagicTest {
        /// Step agent under test.
        agent: AgentId,
        /// Prompt as sent.
        prompt: String,
        /// Preceding agents as sent, order preserved.
        preceding: Vec<AgentId>,
        /// Natural-language transform instructions as sent.
        connector_prompt: String,
    },
    /// `test_code_transform` was called.
    CodeTest {
        /// Step agent under test.
        agent: AgentId,
        /// Live run reference, when one was supplied.
        run: Option<RunId>,
    },
    /// `generate_code` was called.
    GenerateCode {
        /// Step agent under test.
        agent: AgentId,
        /// Natural-language transform instructions as sent.
        connector_prompt: String,
    },
    /// `generate_transformer_from_env` was called.
    GenerateTransformer {
        /// Step agent under test.
        agent: AgentId,
        /// Live run reference, when one was supplied.
        run: Option<RunId>,
    },
}

/// Scripted [`SimulationBackend`]: fixed outcomes, full call log.
///
/// Defaults: environment previews echo the request; transform tests
/// succeed with `{"input": "scripted"}`; code generation succeeds with
/// a trivial transformer. Override per concern with the `with_*`
/// builders.
pub struct ScriptedBackend {
    test_outcome: TransformOutcome,
    codegen_outcome: CodegenOutcome,
    calls: RwLock<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    /// A backend where every test and generation succeeds.
    pub fn new() -> Self {
        Self {
            test_outcome: TransformOutcome::Success(serde_json::json!({"input": "scripted"})),
            codegen_outcome: CodegenOutcome::Success {
                code: "function transform(env) { return env.input; }".into(),
            },
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Override the outcome of transform tests (magic and code).
    pub fn with_test_outcome(mut self, outcome: TransformOutcome) -> Self {
        self.test_outcome = outcome;
        self
    }

    /// Override the outcome of code generation (both variants).
    pub fn with_codegen_outcome(mut self, outcome: CodegenOutcome) -> Self {
        self.codegen_outcome = outcome;
        self
    }

    /// The full call log, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.write().unwrap().push(call);
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimulationBackend for ScriptedBackend {
    async fn simulate_environment(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
    ) -> Result<SimulatedEnvironment, SimulationError> {
        self.record(RecordedCall::Environment {
            agent: agent.clone(),
            prompt: prompt.to_owned(),
            preceding: preceding.to_vec(),
        });
        let flow = preceding
            .iter()
            .enumerate()
            .map(|(i, upstream)| FlowEntry {
                agent_id: upstream.clone(),
                result: serde_json::json!({"text": format!("output of {upstream}")}),
                execution_id: ExecutionId::new(format!("exec-{i}")),
            })
            .collect();
        Ok(SimulatedEnvironment {
            prompt: prompt.to_owned(),
            input: serde_json::json!({}),
            flow,
        })
    }

    async fn test_magic_transform(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<TransformOutcome, SimulationError> {
        self.record(RecordedCall::MagicTest {
            agent: agent.clone(),
            prompt: prompt.to_owned(),
            preceding: preceding.to_vec(),
            connector_prompt: connector_prompt.to_owned(),
        });
        Ok(self.test_outcome.clone())
    }

    async fn test_code_transform(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<TransformOutcome, SimulationError> {
        self.record(RecordedCall::CodeTest {
            agent: agent.clone(),
            run: run.cloned(),
        });
        Ok(self.test_outcome.clone())
    }

    async fn generate_code(
        &self,
        agent: &AgentId,
        _prompt: &str,
        _preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<CodegenOutcome, SimulationError> {
        self.record(RecordedCall::GenerateCode {
            agent: agent.clone(),
            connector_prompt: connector_prompt.to_owned(),
        });
        Ok(self.codegen_outcome.clone())
    }

    async fn generate_transformer_from_env(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<CodegenOutcome, SimulationError> {
        self.record(RecordedCall::GenerateTransformer {
            agent: agent.clone(),
            run: run.cloned(),
        });
        Ok(self.codegen_outcome.clone())
    }
}
