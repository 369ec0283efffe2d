//! Error types for the upstream client.

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors raised while talking to the Vercel REST API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The API answered with a non-2xx status.
    #[error("Vercel API {path} failed {status}: {body}")]
    Api {
        path: String,
        status: u16,
        body: String,
    },

    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UpstreamError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the upstream reported the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
