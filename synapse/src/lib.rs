#![deny(missing_docs)]
//! # synapse — umbrella crate
//!
//! Single import surface for the agent-chain toolkit. Re-exports the
//! protocol crate and the concrete backends behind feature flags, plus
//! a `prelude` for the happy path.

#[cfg(feature = "core")]
pub use link0;
#[cfg(feature = "backend-http")]
pub use synapse_backend_http;
#[cfg(feature = "draft-fs")]
pub use synapse_draft_fs;
#[cfg(feature = "draft-memory")]
pub use synapse_draft_memory;
#[cfg(feature = "editor")]
pub use synapse_editor;

/// Happy-path imports for composing and editing chains.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use link0::{
        AgentCatalog, AgentId, AgentRecord, Chain, ChainStep, CodegenOutcome, ConnectorState,
        ConnectorType, Direction, DraftStore, RunId, SimulatedEnvironment, SimulationBackend,
        Team, TransformEvaluator, TransformOutcome,
    };

    #[cfg(feature = "editor")]
    pub use synapse_editor::{ChainSession, EditorError};

    #[cfg(feature = "backend-http")]
    pub use synapse_backend_http::SynapseBackend;

    #[cfg(feature = "draft-memory")]
    pub use synapse_draft_memory::MemoryDraftStore;

    #[cfg(feature = "draft-fs")]
    pub use synapse_draft_fs::FsDraftStore;
}
