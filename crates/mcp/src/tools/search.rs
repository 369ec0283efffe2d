// Search tool: projects and deployments matching a keyword

use crate::protocol::{CallToolResult, ToolAnnotations, ToolContent, ToolSchema};
use crate::tools::args::SearchArgs;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;
use vercel_mcp_client::models::non_blank;
use vercel_mcp_client::{Deployment, Project, VercelClient};

/// Upper bound on results per kind.
pub const RESULT_LIMIT: usize = 5;

static TEAM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"team:(\S+)").expect("Invalid team token regex"));

/// A search query split into its team scope and residual text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedQuery {
    pub team: Option<String>,
    pub text: String,
}

impl ScopedQuery {
    /// Extract the first `team:<token>` and strip every such token from the text.
    pub fn parse(query: &str) -> Self {
        let team = TEAM_TOKEN
            .captures(query)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        let residual = TEAM_TOKEN.replace_all(query, "");
        let text = residual.split_whitespace().collect::<Vec<_>>().join(" ");

        Self { team, text }
    }

    fn text(&self) -> Option<&str> {
        non_blank(Some(self.text.as_str()))
    }
}

/// Tool to find projects and deployments
pub struct SearchTool {
    client: VercelClient,
}

impl SearchTool {
    pub fn new(client: VercelClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for SearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: SearchArgs::TOOL.to_string(),
            description: "Find projects and deployments on Vercel".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("Search text, e.g. 'team:team_123 my-app'")
                }),
                vec!["query"],
            ),
            annotations: Some(ToolAnnotations::read_only()),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args = match SearchArgs::from_arguments(&arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        let scoped = ScopedQuery::parse(&args.query);
        let limit = RESULT_LIMIT as u32;
        tracing::debug!(text = %scoped.text, team = ?scoped.team, "search");

        let projects_api = self.client.projects();
        let deployments_api = self.client.deployments();
        let (projects, deployments) = tokio::join!(
            projects_api.search(scoped.text(), scoped.team.as_deref(), limit),
            deployments_api.search(scoped.text(), scoped.team.as_deref(), limit),
        );

        let (projects, deployments) = match (projects, deployments) {
            (Err(p), Err(d)) => {
                tracing::warn!(projects = %p, deployments = %d, "search failed upstream");
                return Ok(CallToolResult::error(format!(
                    "Search failed. Projects: {}. Deployments: {}",
                    p, d
                )));
            }
            pair => pair,
        };

        let mut content = Vec::new();

        match projects {
            Ok(list) => content.extend(list.projects.iter().take(RESULT_LIMIT).map(project_item)),
            Err(e) => {
                tracing::warn!(error = %e, "project search failed");
                content.push(ToolContent::error(format!("Project search failed: {}", e)));
            }
        }

        match deployments {
            Ok(list) => content.extend(
                list.deployments
                    .iter()
                    .take(RESULT_LIMIT)
                    .map(deployment_item),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "deployment search failed");
                content.push(ToolContent::error(format!("Deployment search failed: {}", e)));
            }
        }

        if content.is_empty() {
            content.push(ToolContent::text("No matches found."));
        }

        Ok(CallToolResult::success(content))
    }
}

fn project_item(project: &Project) -> ToolContent {
    ToolContent::text(format!(
        "Project • {} • id={}",
        non_blank(project.name.as_deref()).unwrap_or("(unnamed)"),
        non_blank(project.id.as_deref()).unwrap_or("unknown"),
    ))
}

/// One-line summary of a deployment: name, state and target, blanks skipped.
pub fn deployment_title(deployment: &Deployment) -> String {
    let mut parts = vec!["Deployment"];
    parts.extend(non_blank(deployment.name.as_deref()));
    parts.extend(deployment.status());
    parts.extend(non_blank(deployment.target.as_deref()));
    parts.join(" • ")
}

fn deployment_item(deployment: &Deployment) -> ToolContent {
    let title = deployment_title(deployment);
    match deployment.inspector() {
        Some(inspector) => {
            let link = ToolContent::resource_link(inspector, title);
            match deployment.live_url() {
                Some(live) => link.with_description(live),
                None => link,
            }
        }
        None => ToolContent::text(title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> VercelClient {
        VercelClient::builder()
            .base_url(server.uri())
            .token("test-token")
            .build()
            .unwrap()
    }

    async fn mount(server: &MockServer, api_path: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(api_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_team_token_extraction() {
        let scoped = ScopedQuery::parse("team:team_123 my-app");
        assert_eq!(scoped.team.as_deref(), Some("team_123"));
        assert_eq!(scoped.text, "my-app");

        let scoped = ScopedQuery::parse("web team:first  api team:second");
        assert_eq!(scoped.team.as_deref(), Some("first"));
        assert_eq!(scoped.text, "web api");

        let scoped = ScopedQuery::parse("plain query");
        assert_eq!(scoped.team, None);
        assert_eq!(scoped.text, "plain query");

        let scoped = ScopedQuery::parse("team:only");
        assert_eq!(scoped.team.as_deref(), Some("only"));
        assert_eq!(scoped.text(), None);
    }

    #[test]
    fn test_deployment_title_skips_blanks() {
        let deployment = Deployment {
            name: Some("site".into()),
            state: Some("READY".into()),
            target: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(deployment_title(&deployment), "Deployment • site • READY");
    }

    #[tokio::test]
    async fn test_project_match_with_team_scope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v10/projects"))
            .and(query_param("search", "my-app"))
            .and(query_param("teamId", "team_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [{"name": "my-app", "id": "prj_1"}]
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v6/deployments"))
            .and(query_param("app", "my-app"))
            .and(query_param("teamId", "team_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deployments": []})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool
            .execute(json!({"query": "team:team_123 my-app"}))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            vec![ToolContent::text("Project • my-app • id=prj_1")]
        );
        assert_eq!(result.is_error, None);
    }

    #[tokio::test]
    async fn test_projects_listed_before_deployments() {
        let server = MockServer::start().await;

        mount(
            &server,
            "/v10/projects",
            200,
            json!({"projects": [
                {"name": "a", "id": "prj_a"}, {"name": "b", "id": "prj_b"},
                {"name": "c", "id": "prj_c"}, {"name": "d", "id": "prj_d"},
                {"name": "e", "id": "prj_e"}, {"name": "f", "id": "prj_f"}
            ]}),
        )
        .await;
        mount(
            &server,
            "/v6/deployments",
            200,
            json!({"deployments": [
                {"uid": "dpl_1", "name": "a", "state": "READY", "target": "production",
                 "inspectorUrl": "https://vercel.com/acme/a/dpl_1", "url": "a-1.vercel.app"},
                {"uid": "dpl_2", "name": "a", "state": "ERROR"}
            ]}),
        )
        .await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool.execute(json!({"query": "a"})).await.unwrap();

        assert_eq!(result.content.len(), 7);
        assert_eq!(
            result.content[4],
            ToolContent::text("Project • e • id=prj_e")
        );
        assert_eq!(
            result.content[5],
            ToolContent::resource_link(
                "https://vercel.com/acme/a/dpl_1",
                "Deployment • a • READY • production"
            )
            .with_description("https://a-1.vercel.app")
        );
        assert_eq!(result.content[6], ToolContent::text("Deployment • a • ERROR"));
    }

    #[tokio::test]
    async fn test_no_matches() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v10/projects"))
            .and(query_param_is_missing("search"))
            .and(query_param_is_missing("teamId"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"projects": []})))
            .mount(&server)
            .await;
        mount(&server, "/v6/deployments", 200, json!({"deployments": []})).await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool.execute(json!({"query": "   "})).await.unwrap();

        assert_eq!(result.content, vec![ToolContent::text("No matches found.")]);
    }

    #[tokio::test]
    async fn test_partial_failure_degrades_gracefully() {
        let server = MockServer::start().await;

        mount(&server, "/v10/projects", 500, json!({"error": {"code": "internal"}})).await;
        mount(
            &server,
            "/v6/deployments",
            200,
            json!({"deployments": [{"uid": "dpl_1", "name": "web", "state": "READY"}]}),
        )
        .await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool.execute(json!({"query": "web"})).await.unwrap();

        assert_eq!(result.content.len(), 2);
        let note = result.content[0].as_text().unwrap();
        assert!(note.starts_with("Error: Project search failed"));
        assert!(note.contains("500"));
        assert_eq!(result.content[1], ToolContent::text("Deployment • web • READY"));
        assert_eq!(result.is_error, None);
    }

    #[tokio::test]
    async fn test_total_failure_is_single_error_item() {
        let server = MockServer::start().await;

        mount(&server, "/v10/projects", 403, json!({"error": "forbidden"})).await;
        mount(&server, "/v6/deployments", 500, json!({"error": "down"})).await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool.execute(json!({"query": "web"})).await.unwrap();

        assert_eq!(result.content.len(), 1);
        assert_eq!(result.is_error, Some(true));
        let text = result.content[0].as_text().unwrap();
        assert!(text.contains("403"));
        assert!(text.contains("500"));
    }

    #[tokio::test]
    async fn test_malformed_input_makes_no_upstream_call() {
        let server = MockServer::start().await;

        let tool = SearchTool::new(client_for(&server));
        let result = tool.execute(json!({"query": 5})).await.unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_searches_run_concurrently() {
        let server = MockServer::start().await;
        let delay = Duration::from_millis(300);

        Mock::given(method("GET"))
            .and(path("/v10/projects"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"projects": [{"name": "web", "id": "prj_w"}]}))
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v6/deployments"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"deployments": []}))
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tool = SearchTool::new(client_for(&server));
        let started = Instant::now();
        let result = tool.execute(json!({"query": "web"})).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(result.content, vec![ToolContent::text("Project • web • id=prj_w")]);
        assert!(elapsed >= delay);
        assert!(elapsed < delay * 2, "searches ran sequentially: {:?}", elapsed);
    }
}
