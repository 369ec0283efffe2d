//! Main client for the Vercel REST API.

use crate::api::{DeploymentsApi, ProjectsApi};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{UpstreamError, UpstreamResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Read-only client for the Vercel API.
#[derive(Debug, Clone)]
pub struct VercelClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl VercelClient {
    /// Create a new client builder.
    pub fn builder() -> VercelClientBuilder {
        VercelClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> UpstreamResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the projects API.
    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    /// Get the deployments API.
    pub fn deployments(&self) -> DeploymentsApi<'_> {
        DeploymentsApi::new(self)
    }
}

/// Builder for creating a VercelClient.
pub struct VercelClientBuilder {
    base_url: Option<String>,
    token: Option<String>,
    default_team_id: Option<String>,
    timeout: Option<Duration>,
}

impl VercelClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token: None,
            default_team_id: None,
            timeout: None,
        }
    }

    /// Set the base URL of the API. Defaults to `https://api.vercel.com`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the team scope used when a call does not name one.
    pub fn default_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.default_team_id = Some(team_id.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> UpstreamResult<VercelClient> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let token = self
            .token
            .ok_or_else(|| UpstreamError::Config("token is required".to_string()))?;

        let config = ClientConfig {
            base_url,
            token,
            default_team_id: self.default_team_id.filter(|team| !team.is_empty()),
            timeout: self.timeout,
        };

        VercelClient::from_config(config)
    }
}

impl Default for VercelClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
