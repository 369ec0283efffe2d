pub mod args;
pub mod classify;
pub mod fetch;
pub mod search;
mod registry;

pub use args::{FetchArgs, SearchArgs};
pub use classify::{classify_identifier, IdentifierKind};
pub use fetch::FetchTool;
pub use search::{ScopedQuery, SearchTool};
pub use registry::{json_schema_object, json_schema_string, Tool, ToolRegistry};
