//! # link0 — Protocol traits and data model for agent chains
//!
//! This crate defines the data model of an agent chain (an ordered
//! composition of externally-hosted agents with per-step data
//! connectors) and the four collaborator boundaries a chain editor
//! needs to do its work.
//!
//! ## The Model
//!
//! | Concept | Type | What it is |
//! |---------|------|------------|
//! | Chain | [`Chain`] | Ordered sequence of [`ChainStep`]s |
//! | Connector | [`ConnectorType`] | How a step derives its input from upstream |
//! | Connector state | [`ConnectorState`] | unconfigured → configured → tested → generated |
//! | Dry-run preview | [`SimulatedEnvironment`] | What data a step would see at runtime |
//!
//! ## The Collaborators
//!
//! | Boundary | Trait | What it does |
//! |----------|-------|-------------|
//! | Catalog | [`AgentCatalog`] | Agent/team lookup + composite registration |
//! | Simulation | [`SimulationBackend`] | Environment resolution, transform tests, code generation |
//! | Drafts | [`DraftStore`] | Durable draft slot for in-progress chains |
//! | Evaluation | [`TransformEvaluator`] | Sandboxed execution of user transform code |
//!
//! ## Design Principle
//!
//! Every trait is operation-defined, not mechanism-defined.
//! [`SimulationBackend::simulate_environment`] means "compute the data
//! this step would see" — not "POST to this URL." An HTTP client, an
//! in-process fake, and a recorded fixture all implement the same trait,
//! which is what makes editor logic testable without a network.
//!
//! ## Dependency Notes
//!
//! Agent input/output schemas, resolved environments, and transform
//! results are carried as `serde_json::Value`. The backend declares
//! them as JSON-Schema documents and arbitrary JSON payloads; there is
//! nothing to gain from typing them more strongly on this side of the
//! wire.

#![deny(missing_docs)]

pub mod agent;
pub mod catalog;
pub mod chain;
pub mod connector;
pub mod draft;
pub mod error;
pub mod evaluate;
pub mod id;
pub mod simulation;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use agent::{AgentKind, AgentRecord, LocalizedText, NewAgent, Team};
pub use catalog::AgentCatalog;
pub use chain::{Chain, ChainStep, ConnectorType, Direction};
pub use connector::{connector_state, ConnectorState, StepSession};
pub use draft::{ChainDraft, DraftStore, CHAIN_DRAFT_SLOT};
pub use error::{CatalogError, DraftError, EvalError, SimulationError};
pub use evaluate::TransformEvaluator;
pub use id::{AgentId, ExecutionId, RunId};
pub use simulation::{
    effective_prompt, CodegenOutcome, FlowEntry, SimulatedEnvironment, SimulationBackend,
    TransformOutcome, DEFAULT_PROMPT,
};
