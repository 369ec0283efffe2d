// MCP (Model Context Protocol) gateway for the Vercel REST API
// Exposes read-only `search` and `fetch` tools over JSON-RPC.

pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::McpError;
pub use server::{build_server, McpServer};
pub use transport::{BodyBuffer, ExchangeOutcome, HttpExchange};
