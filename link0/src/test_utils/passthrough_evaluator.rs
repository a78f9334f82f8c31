//! PassthroughEvaluator — identity TransformEvaluator for testing.

use crate::error::EvalError;
use crate::evaluate::TransformEvaluator;
use async_trait::async_trait;

/// Evaluator that ignores the source and returns the input unchanged.
///
/// Proves the trait API is usable from editor code without dragging a
/// script engine into the test suite.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughEvaluator;

#[async_trait]
impl TransformEvaluator for PassthroughEvaluator {
    async fn evaluate(
        &self,
        _source: &str,
        input: &serde_json::Value,
    ) -> Result<serde_json::Value, EvalError> {
        Ok(input.clone())
    }
}
