//! The Evaluation boundary — sandboxed execution of user-authored
//! transform code.

use crate::error::EvalError;
use async_trait::async_trait;

/// Boundary ④ — Evaluation
///
/// Runs a user-authored `transform(env)` function against a declared
/// input and returns the produced JSON. The sandbox mechanism is the
/// implementor's concern (isolated worker, subprocess, restricted
/// interpreter); the contract is that the code must not reach host
/// state beyond the declared input.
///
/// Implementations:
/// - `PassthroughEvaluator` (test-utils: returns the input unchanged)
/// - platform evaluators supplied by the embedding application
#[async_trait]
pub trait TransformEvaluator: Send + Sync {
    /// Execute `source` with `input` bound as the transform's
    /// environment argument.
    async fn evaluate(
        &self,
        source: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, EvalError>;
}
