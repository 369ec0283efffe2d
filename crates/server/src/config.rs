use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use vercel_mcp::protocol::ServerInfo;
use vercel_mcp::server::DEFAULT_SERVER_NAME;
use vercel_mcp_client::{VercelClient, DEFAULT_BASE_URL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Bearer token; only ever taken from the CLI or environment.
    #[serde(skip)]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_server_version")]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub default_team_id: Option<String>,
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

fn default_server_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            version: default_server_version(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            default_team_id: None,
        }
    }
}

/// Values from the command line or environment; these win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub team_id: Option<String>,
    pub api_url: Option<String>,
}

impl ServerConfig {
    pub fn load(config_path: &Path, overrides: Overrides) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            Self::from_toml(&content)?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::from_toml("")?
        };

        config.apply(overrides);

        if config.token.is_empty() {
            tracing::warn!("VERCEL_TOKEN is not set; upstream calls will be unauthenticated");
        }

        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration file")
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(token) = overrides.token {
            self.token = token;
        }
        if let Some(team_id) = overrides.team_id.filter(|t| !t.is_empty()) {
            self.upstream.default_team_id = Some(team_id);
        }
        if let Some(api_url) = overrides.api_url.filter(|u| !u.is_empty()) {
            self.upstream.base_url = api_url;
        }
    }

    pub fn server_info(&self) -> ServerInfo {
        ServerInfo {
            name: self.server.name.clone(),
            version: self.server.version.clone(),
        }
    }

    /// Build the upstream client from this configuration.
    pub fn client(&self) -> Result<VercelClient> {
        let mut builder = VercelClient::builder()
            .base_url(&self.upstream.base_url)
            .token(&self.token);

        if let Some(team_id) = &self.upstream.default_team_id {
            builder = builder.default_team_id(team_id);
        }
        if let Some(secs) = self.upstream.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build().context("Failed to create Vercel client")
    }
}

/// Application state shared across handlers; read-only after start.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub client: VercelClient,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self> {
        let client = config.client()?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}
