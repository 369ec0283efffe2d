//! Response models for the endpoints the gateway reads.
//!
//! Every field is optional so that a partially shaped response still decodes.

use serde::{Deserialize, Serialize};

/// A Vercel project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub framework: Option<String>,
    pub latest_deployments: Vec<DeploymentRef>,
}

/// A deployment reference embedded in a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentRef {
    pub id: Option<String>,
    pub uid: Option<String>,
}

impl DeploymentRef {
    pub fn identifier(&self) -> Option<&str> {
        non_blank(self.id.as_deref()).or_else(|| non_blank(self.uid.as_deref()))
    }
}

/// A Vercel deployment.
///
/// The list endpoint reports `uid`/`state`, the detail endpoint `id`/`readyState`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deployment {
    pub id: Option<String>,
    pub uid: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub ready_state: Option<String>,
    pub state: Option<String>,
    pub target: Option<String>,
    pub inspector_url: Option<String>,
}

impl Deployment {
    pub fn identifier(&self) -> Option<&str> {
        non_blank(self.id.as_deref()).or_else(|| non_blank(self.uid.as_deref()))
    }

    pub fn status(&self) -> Option<&str> {
        non_blank(self.ready_state.as_deref()).or_else(|| non_blank(self.state.as_deref()))
    }

    /// Live site URL, with a scheme added when the API returns a bare host.
    pub fn live_url(&self) -> Option<String> {
        non_blank(self.url.as_deref()).map(|url| {
            if url.starts_with("http://") || url.starts_with("https://") {
                url.to_string()
            } else {
                format!("https://{}", url)
            }
        })
    }

    pub fn inspector(&self) -> Option<&str> {
        non_blank(self.inspector_url.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectList {
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentList {
    pub deployments: Vec<Deployment>,
}

/// Treat empty and whitespace-only strings as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deployment_detail_shape() {
        let deployment: Deployment = serde_json::from_value(json!({
            "id": "dpl_abc",
            "name": "site",
            "readyState": "READY",
            "target": "production",
            "url": "site.example.app",
            "extra": {"ignored": true}
        }))
        .unwrap();

        assert_eq!(deployment.identifier(), Some("dpl_abc"));
        assert_eq!(deployment.status(), Some("READY"));
        assert_eq!(deployment.live_url().as_deref(), Some("https://site.example.app"));
        assert_eq!(deployment.inspector(), None);
    }

    #[test]
    fn test_deployment_list_shape_falls_back_to_uid_and_state() {
        let deployment: Deployment = serde_json::from_value(json!({
            "uid": "dpl_1",
            "state": "BUILDING",
            "readyState": ""
        }))
        .unwrap();

        assert_eq!(deployment.identifier(), Some("dpl_1"));
        assert_eq!(deployment.status(), Some("BUILDING"));
    }

    #[test]
    fn test_project_with_latest_deployments() {
        let project: Project = serde_json::from_value(json!({
            "id": "prj_1",
            "name": "my-app",
            "framework": null,
            "latestDeployments": [{"id": "dpl_1"}, {"uid": "dpl_2"}, {}]
        }))
        .unwrap();

        let ids: Vec<_> = project
            .latest_deployments
            .iter()
            .filter_map(DeploymentRef::identifier)
            .collect();
        assert_eq!(ids, vec!["dpl_1", "dpl_2"]);
        assert!(project.framework.is_none());
    }

    #[test]
    fn test_lists_tolerate_missing_keys() {
        let projects: ProjectList = serde_json::from_value(json!({})).unwrap();
        let deployments: DeploymentList =
            serde_json::from_value(json!({"pagination": {}})).unwrap();

        assert!(projects.projects.is_empty());
        assert!(deployments.deployments.is_empty());
    }
}
