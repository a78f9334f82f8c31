//! Wire DTOs for the backend's request and response shapes.

use link0::{AgentId, RunId};
use serde::{Deserialize, Serialize};

/// `GET team` response: `{agents: {members: [{agentId}]}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct TeamResponse {
    pub(crate) agents: TeamMembers,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamMembers {
    #[serde(default)]
    pub(crate) members: Vec<MemberRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MemberRef {
    #[serde(rename = "agentId")]
    pub(crate) agent_id: AgentId,
}

/// Body of `POST context/simulation/chain/env/{agentId}`.
#[derive(Debug, Serialize)]
pub(crate) struct EnvRequest<'a> {
    pub(crate) prompt: &'a str,
    pub(crate) agents: &'a [AgentId],
}

/// Body of the magic-simulation and generate-code endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MagicRequest<'a> {
    pub(crate) agent_id: &'a AgentId,
    pub(crate) prompt: &'a str,
    pub(crate) agents: &'a [AgentId],
    pub(crate) connector_prompt: &'a str,
}

/// Body of the code-test and generate-transformer endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CodeRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) run_id: Option<&'a RunId>,
}
