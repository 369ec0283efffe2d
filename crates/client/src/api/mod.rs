//! Endpoint wrappers, one per upstream resource.

mod deployments;
mod projects;

pub use deployments::DeploymentsApi;
pub use projects::ProjectsApi;

use crate::error::{UpstreamError, UpstreamResult};
use serde::de::DeserializeOwned;

/// Decode a raw JSON body into a typed model, keeping the path for diagnostics.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: serde_json::Value) -> UpstreamResult<T> {
    serde_json::from_value(body).map_err(|source| UpstreamError::Decode {
        path: path.to_string(),
        source,
    })
}
