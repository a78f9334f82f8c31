//! SimulationBackend implementation over the dry-run REST contracts.

use crate::client::SynapseBackend;
use crate::error::{map_sim_status, map_sim_transport};
use crate::types::{CodeRequest, EnvRequest, MagicRequest};
use async_trait::async_trait;
use link0::{
    AgentId, CodegenOutcome, RunId, SimulatedEnvironment, SimulationBackend, SimulationError,
    TransformOutcome,
};

impl SynapseBackend {
    /// POST and decode the body as raw JSON, with simulation error
    /// mapping. The `result | {error}` union endpoints all share this.
    async fn post_value<B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<serde_json::Value, SimulationError> {
        let reply = self.post_reply(url, body).await.map_err(map_sim_transport)?;
        if !reply.status.is_success() {
            return Err(map_sim_status(reply.status, &reply.body));
        }
        serde_json::from_str(&reply.body).map_err(|e| SimulationError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SimulationBackend for SynapseBackend {
    async fn simulate_environment(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
    ) -> Result<SimulatedEnvironment, SimulationError> {
        let value = self
            .post_value(
                &self.env_url(agent),
                &EnvRequest {
                    prompt,
                    agents: preceding,
                },
            )
            .await?;
        serde_json::from_value(value).map_err(|e| SimulationError::Decode(e.to_string()))
    }

    async fn test_magic_transform(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<TransformOutcome, SimulationError> {
        let value = self
            .post_value(
                &self.magic_url(),
                &MagicRequest {
                    agent_id: agent,
                    prompt,
                    agents: preceding,
                    connector_prompt,
                },
            )
            .await?;
        Ok(TransformOutcome::from_value(value))
    }

    async fn test_code_transform(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<TransformOutcome, SimulationError> {
        let value = self
            .post_value(&self.code_url(agent), &CodeRequest { run_id: run })
            .await?;
        Ok(TransformOutcome::from_value(value))
    }

    async fn generate_code(
        &self,
        agent: &AgentId,
        prompt: &str,
        preceding: &[AgentId],
        connector_prompt: &str,
    ) -> Result<CodegenOutcome, SimulationError> {
        let value = self
            .post_value(
                &self.generate_code_url(),
                &MagicRequest {
                    agent_id: agent,
                    prompt,
                    agents: preceding,
                    connector_prompt,
                },
            )
            .await?;
        Ok(CodegenOutcome::from_value(value))
    }

    async fn generate_transformer_from_env(
        &self,
        agent: &AgentId,
        run: Option<&RunId>,
    ) -> Result<CodegenOutcome, SimulationError> {
        let value = self
            .post_value(
                &self.generate_transformer_url(agent),
                &CodeRequest { run_id: run },
            )
            .await?;
        Ok(CodegenOutcome::from_value(value))
    }
}
