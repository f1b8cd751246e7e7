use airwatch::agent::{AgentRequest, AgentResponse, AgentService};
use airwatch::fixtures::FeatureCollection;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Boundary between the dashboard and the agent.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn call(&self, request: &AgentRequest) -> Result<AgentResponse>;
}

/// HTTP client for the airwatch API.
///
/// No retries and no timeout beyond reqwest's defaults; a failed call is
/// surfaced to the caller as-is.
pub struct AgentClient {
    http_client: Client,
    base_url: String,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("airwatch-dashboard/0.1")
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to `/api/mock/agent`.
    pub async fn call(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let url = format!("{}/api/mock/agent", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to send agent request")?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to call ML agent: {}", response.status()));
        }

        response
            .json::<AgentResponse>()
            .await
            .context("Failed to parse agent response")
    }

    /// GET `/api/fixtures` for the map layer.
    pub async fn fetch_fixtures(&self) -> Result<FeatureCollection> {
        let url = format!("{}/api/fixtures", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("Failed to send fixtures request")?;

        if !response.status().is_success() {
            return Err(anyhow!("Failed to fetch fixtures: {}", response.status()));
        }

        response
            .json::<FeatureCollection>()
            .await
            .context("Failed to parse fixtures response")
    }
}

#[async_trait]
impl AgentGateway for AgentClient {
    async fn call(&self, request: &AgentRequest) -> Result<AgentResponse> {
        AgentClient::call(self, request).await
    }
}

/// Runs the agent in-process, skipping HTTP.
pub struct LocalGateway {
    service: Arc<AgentService>,
}

impl LocalGateway {
    pub fn new(service: Arc<AgentService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl AgentGateway for LocalGateway {
    async fn call(&self, request: &AgentRequest) -> Result<AgentResponse> {
        Ok(self.service.handle(request).await?)
    }
}
