//! Backend client struct and builder.

use link0::AgentId;
use serde::Serialize;

/// Client for the synapse catalog and simulation services.
///
/// Implements [`link0::AgentCatalog`] and [`link0::SimulationBackend`]
/// for use anywhere those boundaries are accepted.
///
/// # Example
///
/// ```no_run
/// use synapse_backend_http::SynapseBackend;
///
/// let backend = SynapseBackend::new("https://api.example.com")
///     .bearer_token("eyJ...");
/// ```
pub struct SynapseBackend {
    /// Service base URL (override for testing or proxies).
    pub(crate) base_url: String,
    /// Optional bearer token attached to every request.
    pub(crate) bearer: Option<String>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

/// Raw reply: status plus body text, before any endpoint-specific
/// decoding.
pub(crate) struct Reply {
    pub(crate) status: reqwest::StatusCode,
    pub(crate) body: String,
}

impl SynapseBackend {
    /// Create a new client for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            bearer: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a bearer token to every request.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub(crate) fn team_url(&self) -> String {
        format!("{}/team", self.base_url)
    }

    pub(crate) fn agent_url(&self, id: &AgentId) -> String {
        format!("{}/agent/{}", self.base_url, id)
    }

    pub(crate) fn agents_url(&self) -> String {
        format!("{}/agents", self.base_url)
    }

    pub(crate) fn env_url(&self, agent: &AgentId) -> String {
        format!("{}/context/simulation/chain/env/{}", self.base_url, agent)
    }

    pub(crate) fn magic_url(&self) -> String {
        format!("{}/context/simulation/chain/magic-simulation", self.base_url)
    }

    pub(crate) fn code_url(&self, agent: &AgentId) -> String {
        format!("{}/context/simulation/chain/code/{}", self.base_url, agent)
    }

    pub(crate) fn generate_code_url(&self) -> String {
        format!("{}/context/simulation/chain/generate-code", self.base_url)
    }

    pub(crate) fn generate_transformer_url(&self, agent: &AgentId) -> String {
        format!(
            "{}/context/simulation/chain/generate-transformer/{}",
            self.base_url, agent
        )
    }

    pub(crate) async fn get_reply(&self, url: &str) -> Result<Reply, reqwest::Error> {
        tracing::debug!(url = %url, "GET");
        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }

    pub(crate) async fn post_reply<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Reply, reqwest::Error> {
        tracing::debug!(url = %url, "POST");
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let backend = SynapseBackend::new("http://localhost:9999/");
        assert_eq!(backend.base_url, "http://localhost:9999");
    }

    #[test]
    fn bearer_token_is_stored() {
        let backend = SynapseBackend::new("http://localhost:9999").bearer_token("tok");
        assert_eq!(backend.bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn catalog_urls_include_paths() {
        let backend = SynapseBackend::new("http://localhost:9999");
        assert_eq!(backend.team_url(), "http://localhost:9999/team");
        assert_eq!(
            backend.agent_url(&"a1".into()),
            "http://localhost:9999/agent/a1"
        );
        assert_eq!(backend.agents_url(), "http://localhost:9999/agents");
    }

    #[test]
    fn simulation_urls_share_the_chain_prefix() {
        let backend = SynapseBackend::new("http://localhost:9999");
        assert_eq!(
            backend.env_url(&"a1".into()),
            "http://localhost:9999/context/simulation/chain/env/a1"
        );
        assert_eq!(
            backend.magic_url(),
            "http://localhost:9999/context/simulation/chain/magic-simulation"
        );
        assert_eq!(
            backend.code_url(&"a1".into()),
            "http://localhost:9999/context/simulation/chain/code/a1"
        );
        assert_eq!(
            backend.generate_code_url(),
            "http://localhost:9999/context/simulation/chain/generate-code"
        );
        assert_eq!(
            backend.generate_transformer_url(&"a1".into()),
            "http://localhost:9999/context/simulation/chain/generate-transformer/a1"
        );
    }
}
