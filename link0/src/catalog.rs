//! The Catalog boundary — agent/team lookup and composite registration.

use crate::agent::{AgentRecord, NewAgent, Team};
use crate::error::CatalogError;
use crate::id::AgentId;
use async_trait::async_trait;

/// Boundary ① — Catalog
///
/// The externally-managed agent catalog and the account's team view
/// of it. The editor treats agent references as weak lookup keys into
/// this boundary; a failed lookup is recovered locally (repair sweep),
/// not propagated — except at publish time, where the boundary agents
/// must resolve.
///
/// Implementations:
/// - `SynapseBackend` (HTTPS JSON, the production path)
/// - `MockCatalog` (test-utils: in-memory records)
#[async_trait]
pub trait AgentCatalog: Send + Sync {
    /// The ordered team of agents enabled for the current account.
    async fn team(&self) -> Result<Team, CatalogError>;

    /// Look up one agent. `Ok(None)` when the ID does not resolve —
    /// an absent agent is an answer, not a transport failure.
    async fn agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, CatalogError>;

    /// Register a new agent (used to publish a chain composite).
    /// Returns the created record, including its assigned ID.
    async fn create_agent(&self, agent: NewAgent) -> Result<AgentRecord, CatalogError>;
}
