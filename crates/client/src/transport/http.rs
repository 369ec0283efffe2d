//! HTTP transport layer for the Vercel client.

use crate::config::ClientConfig;
use crate::error::{UpstreamError, UpstreamResult};
use crate::query::UpstreamQuery;
use reqwest::{header, Client};
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making authenticated GET requests.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> UpstreamResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| UpstreamError::Config("Invalid token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = Client::builder()
            .user_agent(concat!("vercel-mcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Build a URL from raw path segments. Each segment is percent-encoded.
    fn build_url(&self, segments: &[&str]) -> UpstreamResult<url::Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Config("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Execute a GET request against a fixed `/`-separated path.
    pub async fn call(
        &self,
        path: &str,
        query: &UpstreamQuery,
    ) -> UpstreamResult<serde_json::Value> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.call_segments(&segments, query).await
    }

    /// Execute a GET request against path segments.
    ///
    /// Use this when a segment is caller-supplied and may contain `/` or `:`.
    pub async fn call_segments(
        &self,
        segments: &[&str],
        query: &UpstreamQuery,
    ) -> UpstreamResult<serde_json::Value> {
        let path = format!("/{}", segments.join("/"));
        let url = self.build_url(segments)?;
        debug!(path = %path, "GET request");

        let response = self.client.get(url).query(&query.pairs()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path = %path, status = status.as_u16(), "Upstream call failed");
            return Err(UpstreamError::Api {
                path,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| UpstreamError::Decode { path, source })
    }
}
