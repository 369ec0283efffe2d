// Identifier classification for `fetch`

/// Prefix of Vercel deployment ids.
pub const DEPLOYMENT_ID_PREFIX: &str = "dpl_";

/// Domain suffix of Vercel-hosted deployments.
pub const DEPLOYMENT_DOMAIN_SUFFIX: &str = ".vercel.app";

/// What a `fetch` identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Deployment id, deployment host, or deployment URL.
    Deployment,
    /// Project id or project name.
    Project,
}

/// Classify a `fetch` identifier.
///
/// Anything that is a deployment id, mentions the deployment domain, or is an
/// absolute http(s) URL is a deployment; everything else is a project.
pub fn classify_identifier(id: &str) -> IdentifierKind {
    let id = id.trim();
    let lower = id.to_ascii_lowercase();

    if id.starts_with(DEPLOYMENT_ID_PREFIX)
        || lower.contains(DEPLOYMENT_DOMAIN_SUFFIX)
        || is_absolute_url(id)
    {
        IdentifierKind::Deployment
    } else {
        IdentifierKind::Project
    }
}

fn is_absolute_url(id: &str) -> bool {
    url::Url::parse(id)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_table() {
        let cases = [
            ("dpl_abc123", IdentifierKind::Deployment),
            ("my-app-git-main-acme.vercel.app", IdentifierKind::Deployment),
            ("MY-APP.VERCEL.APP", IdentifierKind::Deployment),
            ("https://my-app.vercel.app", IdentifierKind::Deployment),
            ("https://www.example.com", IdentifierKind::Deployment),
            ("http://localhost:3000/preview", IdentifierKind::Deployment),
            ("prj_12345", IdentifierKind::Project),
            ("my-app", IdentifierKind::Project),
            ("example.com", IdentifierKind::Project),
            ("dpl", IdentifierKind::Project),
            ("team:acme", IdentifierKind::Project),
            ("mailto:ops@example.com", IdentifierKind::Project),
        ];

        for (id, expected) in cases {
            assert_eq!(classify_identifier(id), expected, "{}", id);
        }
    }
}
