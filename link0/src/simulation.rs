//! The Simulation boundary — dry-run environment resolution, transform
//! tests, and code generation.
//!
//! Everything here is read-only from the chain's perspective: a
//! simulation never mutates the model, so a superseded response can be
//! discarded without cleanup. That property is what lets the editor
//! skip cancellation tokens entirely.

use crate::error::SimulationError;
use crate::id::{AgentId, ExecutionId, RunId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Placeholder seeding the environment when the user has typed no
/// prompt yet. Fixed so that repeated previews are comparable.
pub const DEFAULT_PROMPT: &str = "Show me what you can do with an example input.";

/// Resolve the prompt actually sent to the simulation service:
/// a blank prompt falls back to [`DEFAULT_PROMPT`].
pub fn effective_prompt(prompt: &str) -> &str {
    if prompt.trim().is_empty() {
        DEFAULT_PROMPT
    } else {
        prompt
    }
}

/// One simulated upstream execution within an environment preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEntry {
    /// The upstream agent that was simulated.
    pub agent_id: AgentId,
    /// Its simulated output payload.
    pub result: serde_json::Value,
    /// Handle for the simulated execution.
    pub execution_id: ExecutionId,
}

/// Backend-computed preview of the data available to a chain step.
///
/// Ephemeral by contract: used only for the current connector-testing
/// session and discarded when the panel closes. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedEnvironment {
    /// The prompt that seeded the simulation.
    pub prompt: String,
    /// Resolved input parameters for the step under test.
    #[serde(default)]
    pub input: serde_json::Value,
    /// Simulated outputs of each upstream agent, in chain order.
    #[serde(default)]
    pub flow: Vec<FlowEntry>,
}

/// Result of a transform test.
///
/// The backend answers with either the transformed input JSON or an
/// error-shaped payload (`{error, details}`). Both are ordinary data
/// for the caller — rendered inline, always retryable — which is why
/// this is an enum and not an `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOutcome {
    /// The transform produced the step's effective input.
    Success(serde_json::Value),
    /// The backend judged the transform infeasible.
    Failed {
        /// Human-readable reason.
        error: String,
        /// Structured detail payload, when the backend provides one.
        details: Option<serde_json::Value>,
    },
}

impl TransformOutcome {
    /// The gating criterion for "test succeeded": a non-null response
    /// without an `error` key.
    pub fn succeeded(&self) -> bool {
        matches!(self, TransformOutcome::Success(_))
    }

    /// Decode a raw backend response body into an outcome.
    ///
    /// Null is a failure (the backend produced nothing); an object
    /// carrying an `error` key is a failure with optional `details`;
    /// anything else is the transformed value.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => TransformOutcome::Failed {
                error: "empty result".into(),
                details: None,
            },
            serde_json::Value::Object(map) if map.contains_key("error") => {
                let error = match &map["error"] {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                TransformOutcome::Failed {
                    error,
                    details: map.get("details").cloned(),
                }
            }
            value => TransformOutcome::Success(value),
        }
    }
}

/// Result of a code-generation request.
#[derive(Debug, Clone, PartialEq)]
pub enum CodegenOutcome {
    /// The backend produced a `transform(env)` function body.
    Success {
        /// JavaScript source of the generated transformer.
        code: String,
    },
    /// The backend declined to generate code.
    Failed {
        /// Human-readable reason.
        error: String,
        /// Structured detail payload, when the backend provides one.
        details: Option<serde_json::Value>,
    },
}

impl CodegenOutcome {
    /// Decode a raw backend response body (`{code}` or `{error, …}`).
    pub fn from_value(value: serde_json::Value) -> Self {
        match value.get("code").and_then(|c| c.as_str()) {
            Some(code) => CodegenOutcome::Success { code: code.into() },
            None => match TransformOutcome::from_value(value) {
                TransformOutcome::Failed { error, details } => {
                    CodegenOutcome::Failed { error, details }
                }
                TransformOutcome::Success(other) => CodegenOutcome::Failed {
                    error: format!("response carried no code: {other}"),
                    details: None,
                },
            },
        }
    }
}

/// Boundary ② — Simulation
///
/// How the editor dry-runs a step against the backend's
/// environment-resolution and code-generation services.
///
/// Implementations:
/// - `SynapseBackend` (HTTPS JSON, the production path)
/// - `ScriptedBackend` (test-utils: canned outcomes + call recording)
///
/// Guarantees required of every implementation:
/// - purely read-only with respect to the chain model;
/// - `preceding` is honored exactly as given (ordered, strictly
///   upstream, duplicates preserved);
/// - backend-computed refusals surface as [`TransformOutcome::Failed`]
///   / [`CodegenOutcome::Failed`], never as `Err` — `Err` is reserved
///   for transport and decode failures.
#[async_trait]
pub trait SimulationBackend: Send + Sync {
    /// Compute the data environment available to `agent`, given the
    /// seeding prompt and the ordered upstream agents.
    async fn simulate_environment(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
    ) -> Result<SimulatedEnvironment, SimulationError>;

    /// Perform the magic transform described by `connector_prompt`
    /// against the simulated environment and return the resulting
    /// input JSON.
    async fn test_magic_transform(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<TransformOutcome, SimulationError>;

    /// Resolve the step's effective input through its code connector,
    /// from either a recorded live run or a synthetic environment.
    async fn test_code_transform(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<TransformOutcome, SimulationError>;

    /// Compile the magic transform into JavaScript source.
    async fn generate_code(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<CodegenOutcome, SimulationError>;

    /// Derive a starter transformer from the live/synthetic
    /// environment, for code steps with no magic prompt to compile.
    async fn generate_transformer_from_env(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<CodegenOutcome, SimulationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_prompt_falls_back_to_placeholder() {
        assert_eq!(effective_prompt("  "), DEFAULT_PROMPT);
        assert_eq!(effective_prompt("Summarize this"), "Summarize this");
    }

    #[test]
    fn null_response_is_a_failure() {
        let outcome = TransformOutcome::from_value(json!(null));
        assert!(!outcome.succeeded());
    }

    #[test]
    fn error_key_is_a_failure_with_details() {
        let outcome = TransformOutcome::from_value(json!({
            "error": "missing field x",
            "details": {"field": "x"},
        }));
        match outcome {
            TransformOutcome::Failed { error, details } => {
                assert_eq!(error, "missing field x");
                assert_eq!(details, Some(json!({"field": "x"})));
            }
            TransformOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn plain_object_is_a_success() {
        let outcome = TransformOutcome::from_value(json!({"text": "hello"}));
        assert!(outcome.succeeded());
    }

    #[test]
    fn codegen_decodes_code_field() {
        let outcome = CodegenOutcome::from_value(json!({"code": "function transform(env) {}"}));
        assert_eq!(
            outcome,
            CodegenOutcome::Success {
                code: "function transform(env) {}".into()
            }
        );
    }

    #[test]
    fn codegen_error_payload_is_a_failure() {
        let outcome = CodegenOutcome::from_value(json!({"error": "nope"}));
        assert!(matches!(outcome, CodegenOutcome::Failed { .. }));
    }

    #[test]
    fn simulated_environment_tolerates_missing_flow() {
        let env: SimulatedEnvironment =
            serde_json::from_value(json!({"prompt": "hi"})).unwrap();
        assert!(env.flow.is_empty());
        assert_eq!(env.input, serde_json::Value::Null);
    }
}
