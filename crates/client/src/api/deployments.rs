//! Deployments API endpoints.

use super::decode;
use crate::client::VercelClient;
use crate::error::UpstreamResult;
use crate::models::{Deployment, DeploymentList};
use crate::query::UpstreamQuery;

const LIST_PATH: &str = "/v6/deployments";

/// Deployments API.
pub struct DeploymentsApi<'a> {
    client: &'a VercelClient,
}

impl<'a> DeploymentsApi<'a> {
    pub(crate) fn new(client: &'a VercelClient) -> Self {
        Self { client }
    }

    /// List deployments, optionally filtered by app name.
    pub async fn search(
        &self,
        app: Option<&str>,
        team: Option<&str>,
        limit: u32,
    ) -> UpstreamResult<DeploymentList> {
        let query = UpstreamQuery::new()
            .param("app", app)
            .param("teamId", self.client.config().team_scope(team))
            .param("limit", Some(limit));

        let body = self.client.http.call(LIST_PATH, &query).await?;
        decode(LIST_PATH, body)
    }

    /// Get a deployment by id or URL. The API accepts either form as the key.
    pub async fn get(&self, id_or_url: &str, team: Option<&str>) -> UpstreamResult<Deployment> {
        let query =
            UpstreamQuery::new().param("teamId", self.client.config().team_scope(team));

        let body = self
            .client
            .http
            .call_segments(&["v13", "deployments", id_or_url], &query)
            .await?;
        decode(&format!("/v13/deployments/{}", id_or_url), body)
    }
}
