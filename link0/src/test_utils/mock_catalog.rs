//! MockCatalog — in-memory AgentCatalog for testing.

use crate::agent::{AgentRecord, NewAgent, Team};
use crate::catalog::AgentCatalog;
use crate::error::CatalogError;
use crate::id::AgentId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory catalog with a fixed team order and recorded creations.
pub struct MockCatalog {
    team: RwLock<Vec<AgentId>>,
    records: RwLock<HashMap<String, AgentRecord>>,
    created: RwLock<Vec<NewAgent>>,
}

impl MockCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            team: RwLock::new(Vec::new()),
            records: RwLock::new(HashMap::new()),
            created: RwLock::new(Vec::new()),
        }
    }

    /// Create a catalog whose team members are bare records with the
    /// given IDs (title = ID, no schemas).
    pub fn with_team(ids: &[&str]) -> Self {
        let catalog = Self::new();
        for id in ids {
            catalog.add_team_agent(Self::bare_record(id));
        }
        catalog
    }

    /// A minimal record for an ID: title mirrors the ID, everything
    /// else defaulted.
    pub fn bare_record(id: &str) -> AgentRecord {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": {"en": id},
        }))
        .unwrap()
    }

    /// Register a record and append it to the team order.
    pub fn add_team_agent(&self, record: AgentRecord) {
        self.team.write().unwrap().push(record.id.clone());
        self.records
            .write()
            .unwrap()
            .insert(record.id.to_string(), record);
    }

    /// Register a record without team membership.
    pub fn add_agent(&self, record: AgentRecord) {
        self.records
            .write()
            .unwrap()
            .insert(record.id.to_string(), record);
    }

    /// Remove an agent from the team and the record set (simulates an
    /// externally deleted agent).
    pub fn remove_agent(&self, id: &AgentId) {
        self.team.write().unwrap().retain(|m| m != id);
        self.records.write().unwrap().remove(id.as_str());
    }

    /// Everything submitted through `create_agent`, in order.
    pub fn created(&self) -> Vec<NewAgent> {
        self.created.read().unwrap().clone()
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentCatalog for MockCatalog {
    async fn team(&self) -> Result<Team, CatalogError> {
        Ok(Team::new(self.team.read().unwrap().clone()))
    }

    async fn agent(&self, id: &AgentId) -> Result<Option<AgentRecord>, CatalogError> {
        Ok(self.records.read().unwrap().get(id.as_str()).cloned())
    }

    async fn create_agent(&self, agent: NewAgent) -> Result<AgentRecord, CatalogError> {
        self.created.write().unwrap().push(agent.clone());
        let id = AgentId::new(format!("created-{}", self.created.read().unwrap().len()));
        let record = AgentRecord {
            id: id.clone(),
            title: agent.title,
            description: agent.description,
            input: agent.input,
            input_example: agent.input_example,
            output: agent.output,
            output_example: agent.output_example,
            agent_endpoint: agent.agent_endpoint,
            kind: agent.kind,
            configuration: agent.configuration,
            credits_per_run: agent.credits_per_run,
            stars: agent.stars,
            icon_svg: agent.icon_svg,
        };
        self.records
            .write()
            .unwrap()
            .insert(id.to_string(), record.clone());
        Ok(record)
    }
}
