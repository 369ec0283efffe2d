//! # Vercel client
//!
//! Read-only client for the Vercel REST API, used by the MCP gateway.
//!
//! ```rust,no_run
//! use vercel_mcp_client::{UpstreamResult, VercelClient};
//!
//! # async fn example() -> UpstreamResult<()> {
//! let client = VercelClient::builder()
//!     .token("vercel-token")
//!     .default_team_id("team_123")
//!     .build()?;
//!
//! let projects = client.projects().search(Some("my-app"), None, 5).await?;
//! println!("Found {} projects", projects.projects.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

pub use client::{VercelClient, VercelClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{UpstreamError, UpstreamResult};
pub use models::{Deployment, DeploymentList, DeploymentRef, Project, ProjectList};
pub use query::{QueryValue, UpstreamQuery};
