// Fetch tool: one project or deployment by identifier

use crate::protocol::{CallToolResult, ToolAnnotations, ToolContent, ToolSchema};
use crate::tools::args::FetchArgs;
use crate::tools::classify::{classify_identifier, IdentifierKind};
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::Result;
use vercel_mcp_client::models::non_blank;
use vercel_mcp_client::{Deployment, DeploymentRef, Project, VercelClient};

/// Number of recent deployment ids listed for a project.
const RECENT_DEPLOYMENTS: usize = 3;

/// Tool to fetch a single project or deployment
pub struct FetchTool {
    client: VercelClient,
}

impl FetchTool {
    pub fn new(client: VercelClient) -> Self {
        Self { client }
    }

    async fn fetch_deployment(&self, id: &str) -> CallToolResult {
        match self.client.deployments().get(id, None).await {
            Ok(deployment) => deployment_result(id, &deployment),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "deployment fetch failed");
                CallToolResult::error(format!("Failed to fetch deployment {}: {}", id, e))
            }
        }
    }

    async fn fetch_project(&self, id: &str) -> CallToolResult {
        match self.client.projects().get(id, None).await {
            Ok(project) => project_result(id, &project),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "project fetch failed");
                CallToolResult::error(format!("Failed to fetch project {}: {}", id, e))
            }
        }
    }
}

#[async_trait::async_trait]
impl Tool for FetchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: FetchArgs::TOOL.to_string(),
            description: "Fetch a Vercel project (id or name) or deployment (id, host or URL)"
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "id": json_schema_string("Project id/name, deployment id (dpl_...), or deployment URL")
                }),
                vec!["id"],
            ),
            annotations: Some(ToolAnnotations::read_only()),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args = match FetchArgs::from_arguments(&arguments) {
            Ok(args) => args,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };

        let kind = classify_identifier(&args.id);
        tracing::debug!(id = %args.id, kind = ?kind, "fetch");

        Ok(match kind {
            IdentifierKind::Deployment => self.fetch_deployment(&args.id).await,
            IdentifierKind::Project => self.fetch_project(&args.id).await,
        })
    }
}

/// Summary text plus links to the inspector and the live site.
fn deployment_result(requested: &str, deployment: &Deployment) -> CallToolResult {
    let id = deployment.identifier().unwrap_or(requested);
    let name = non_blank(deployment.name.as_deref());
    let live_url = deployment.live_url();

    let mut lines = vec![match name {
        Some(name) => format!("Deployment {} ({})", name, id),
        None => format!("Deployment {}", id),
    }];
    if let Some(state) = deployment.status() {
        lines.push(format!("State: {}", state));
    }
    if let Some(target) = non_blank(deployment.target.as_deref()) {
        lines.push(format!("Target: {}", target));
    }
    if let Some(url) = &live_url {
        lines.push(format!("URL: {}", url));
    }
    if let Some(inspector) = deployment.inspector() {
        lines.push(format!("Inspector: {}", inspector));
    }

    let label = name.unwrap_or(id);
    let mut content = vec![ToolContent::text(lines.join("\n"))];
    if let Some(inspector) = deployment.inspector() {
        content.push(
            ToolContent::resource_link(inspector, format!("Inspect {}", label))
                .with_description("Deployment inspector"),
        );
    }
    if let Some(url) = live_url {
        content.push(ToolContent::resource_link(url, label).with_description("Live site"));
    }

    CallToolResult::success(content)
}

fn project_result(requested: &str, project: &Project) -> CallToolResult {
    let name = non_blank(project.name.as_deref()).unwrap_or(requested);

    let mut lines = vec![format!("Project {}", name)];
    if let Some(id) = non_blank(project.id.as_deref()) {
        lines.push(format!("ID: {}", id));
    }
    if let Some(framework) = non_blank(project.framework.as_deref()) {
        lines.push(format!("Framework: {}", framework));
    }

    let recent: Vec<&str> = project
        .latest_deployments
        .iter()
        .filter_map(DeploymentRef::identifier)
        .take(RECENT_DEPLOYMENTS)
        .collect();
    if !recent.is_empty() {
        lines.push(format!("Recent deployments: {}", recent.join(", ")));
    }

    CallToolResult::success(vec![ToolContent::text(lines.join("\n"))])
}
