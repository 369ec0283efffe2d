//! Argument validation, one explicit step per tool.
//!
//! The advertised input schema is advisory; clients may send anything. Each
//! tool turns the loose argument object into a typed value here before any
//! upstream work happens.

use crate::error::McpError;
use serde_json::{Map, Value};

/// Validated `search` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchArgs {
    pub query: String,
}

impl SearchArgs {
    pub const TOOL: &'static str = "search";

    pub fn from_arguments(arguments: &Value) -> Result<Self, McpError> {
        let object = as_object(Self::TOOL, arguments)?;
        let query = required_string(Self::TOOL, object, "query")?;
        Ok(Self { query })
    }
}

/// Validated `fetch` arguments. The id is trimmed and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchArgs {
    pub id: String,
}

impl FetchArgs {
    pub const TOOL: &'static str = "fetch";

    pub fn from_arguments(arguments: &Value) -> Result<Self, McpError> {
        let object = as_object(Self::TOOL, arguments)?;
        let id = required_string(Self::TOOL, object, "id")?;
        let id = id.trim();
        if id.is_empty() {
            return Err(McpError::malformed(Self::TOOL, "`id` must not be empty"));
        }
        Ok(Self { id: id.to_string() })
    }
}

/// Absent arguments (`null`) are treated like an empty object.
fn as_object<'a>(tool: &str, arguments: &'a Value) -> Result<Option<&'a Map<String, Value>>, McpError> {
    match arguments {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(McpError::malformed(
            tool,
            format!("arguments must be an object, got {}", type_name(other)),
        )),
    }
}

fn required_string(
    tool: &str,
    object: Option<&Map<String, Value>>,
    field: &str,
) -> Result<String, McpError> {
    match object.and_then(|map| map.get(field)) {
        Some(Value::String(value)) => Ok(value.clone()),
        None | Some(Value::Null) => Err(McpError::malformed(tool, format!("`{}` is required", field))),
        Some(other) => Err(McpError::malformed(
            tool,
            format!("`{}` must be a string, got {}", field, type_name(other)),
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
