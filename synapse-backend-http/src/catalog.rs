//! AgentCatalog implementation over the catalog REST contracts.

use crate::client::SynapseBackend;
use crate::error::{map_catalog_status, map_catalog_transport};
use crate::types::TeamResponse;
use async_trait::async_trait;
use link0::{AgentCatalog, AgentId, AgentRecord, CatalogError, NewAgent, Team};

#[async_trait]
impl AgentCatalog for SynapseBackend {
    async fn team(&self) -> Result<Team, CatalogError> {
        let reply = self
            .get_reply(&self.team_url())
            .await
            .map_err(map_catalog_transport)?;
        if !reply.status.is_success() {
            return Err(map_catalog_status(reply.status, &reply.body));
        }
        let parsed: TeamResponse = serde_json::from_str(&reply.body)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(Team::new(
            parsed
                .agents
                .members
                .into_iter()
                .map(|m| m.agent_id)
                .collect(),
        ))
    }

    async fn agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, CatalogError> {
        let reply = self
            .get_reply(&self.agent_url(id))
            .await
            .map_err(map_catalog_transport)?;
        // An unknown ID is an answer, not a failure: the editor's
        // repair sweep handles it.
        if reply.status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !reply.status.is_success() {
            return Err(map_catalog_status(reply.status, &reply.body));
        }
        let record: AgentRecord = serde_json::from_str(&reply.body)
            .map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(Some(record))
    }

    async fn create_agent(&self, agent: NewAgent) -> Result<AgentRecord, CatalogError> {
        let reply = self
            .post_reply(&self.agents_url(), &agent)
            .await
            .map_err(map_catalog_transport)?;
        if !reply.status.is_success() {
            return Err(map_catalog_status(reply.status, &reply.body));
        }
        serde_json::from_str(&reply.body).map_err(|e| CatalogError::Decode(e.to_string()))
    }
}
