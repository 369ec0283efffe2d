//! Configuration types for the upstream client.

use std::time::Duration;
use url::Url;

/// Default base URL of the Vercel REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.vercel.com";

/// Configuration for the Vercel client.
///
/// Built once at process start and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Vercel API.
    pub base_url: Url,
    /// Bearer token attached to every request.
    pub token: String,
    /// Team scope applied when a caller does not name one.
    pub default_team_id: Option<String>,
    /// Request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL and token.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url,
            token: token.into(),
            default_team_id: None,
            timeout: None,
        }
    }

    /// Resolve the team scope for a call: an explicit team wins, then the default.
    pub fn team_scope<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .filter(|team| !team.is_empty())
            .or_else(|| self.default_team_id.as_deref().filter(|team| !team.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap(), "tok")
    }

    #[test]
    fn test_client_config_new() {
        let config = config();

        assert_eq!(config.base_url.as_str(), "https://api.vercel.com/");
        assert_eq!(config.token, "tok");
        assert!(config.default_team_id.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_team_scope_prefers_explicit() {
        let mut config = config();
        config.default_team_id = Some("team_default".to_string());

        assert_eq!(config.team_scope(Some("team_x")), Some("team_x"));
        assert_eq!(config.team_scope(None), Some("team_default"));
        assert_eq!(config.team_scope(Some("")), Some("team_default"));
    }

    #[test]
    fn test_team_scope_absent() {
        let mut config = config();
        assert_eq!(config.team_scope(None), None);

        config.default_team_id = Some(String::new());
        assert_eq!(config.team_scope(None), None);
    }
}
