//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable, plus enough
//! call recording to assert request shapes without a network.

mod memory_draft;
mod mock_catalog;
mod passthrough_evaluator;
mod scripted_backend;

pub use memory_draft::MemoryDraft;
pub use mock_catalog::MockCatalog;
pub use passthrough_evaluator::PassthroughEvaluator;
pub use scripted_backend::{RecordedCall, ScriptedBackend};
