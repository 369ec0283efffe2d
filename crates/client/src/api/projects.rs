//! Projects API endpoints.

use super::decode;
use crate::client::VercelClient;
use crate::error::UpstreamResult;
use crate::models::{Project, ProjectList};
use crate::query::UpstreamQuery;

const SEARCH_PATH: &str = "/v10/projects";

/// Projects API.
pub struct ProjectsApi<'a> {
    client: &'a VercelClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a VercelClient) -> Self {
        Self { client }
    }

    /// Search projects by name.
    ///
    /// An empty `text` lists the most recent projects in scope.
    pub async fn search(
        &self,
        text: Option<&str>,
        team: Option<&str>,
        limit: u32,
    ) -> UpstreamResult<ProjectList> {
        let query = UpstreamQuery::new()
            .param("search", text)
            .param("teamId", self.client.config().team_scope(team))
            .param("limit", Some(limit));

        let body = self.client.http.call(SEARCH_PATH, &query).await?;
        decode(SEARCH_PATH, body)
    }

    /// Get a project by id or name.
    pub async fn get(&self, id_or_name: &str, team: Option<&str>) -> UpstreamResult<Project> {
        let query =
            UpstreamQuery::new().param("teamId", self.client.config().team_scope(team));

        let body = self
            .client
            .http
            .call_segments(&["v9", "projects", id_or_name], &query)
            .await?;
        decode(&format!("/v9/projects/{}", id_or_name), body)
    }
}
