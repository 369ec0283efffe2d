// MCP server: stateless JSON-RPC dispatcher over a tool registry

use crate::error::McpError;
use crate::protocol::{
    negotiate_protocol_version, CallToolParams, CallToolResult, InitializeParams,
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities,
    ServerInfo, ToolsCapability, JSONRPC_VERSION,
};
use crate::tools::{FetchTool, SearchTool, ToolRegistry};
use serde_json::Value;
use std::sync::Arc;
use vercel_mcp_client::VercelClient;

/// Default name reported by `initialize`.
pub const DEFAULT_SERVER_NAME: &str = "vercel-readonly";

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build a fresh server with the `search` and `fetch` tools.
///
/// Called once per inbound request; nothing is shared between instances
/// except the upstream client's connection pool.
pub fn build_server(client: &VercelClient, info: ServerInfo) -> McpServer {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(SearchTool::new(client.clone())));
    registry.register(Arc::new(FetchTool::new(client.clone())));

    McpServer::new(info, registry)
}

pub struct McpServer {
    info: ServerInfo,
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(info: ServerInfo, registry: ToolRegistry) -> Self {
        Self { info, registry }
    }

    /// Handle one parsed payload: a single message or a batch.
    ///
    /// Returns `None` when nothing needs to be sent back (notifications and
    /// client responses only).
    pub async fn handle_message(&self, payload: Value) -> Option<Value> {
        match payload {
            Value::Array(messages) if messages.is_empty() => Some(error_value(
                Value::Null,
                McpError::InvalidRequest("empty batch".to_string()),
            )),
            Value::Array(messages) => {
                let mut responses = Vec::new();
                for message in messages {
                    if let Some(response) = self.handle_single(message).await {
                        responses.push(response);
                    }
                }
                (!responses.is_empty()).then(|| Value::Array(responses))
            }
            message => self.handle_single(message).await,
        }
    }

    async fn handle_single(&self, message: Value) -> Option<Value> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);

        // A client answering a server request; nothing to dispatch.
        if message.get("method").is_none()
            && (message.get("result").is_some() || message.get("error").is_some())
        {
            return None;
        }

        let request: JsonRpcRequest = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => return Some(error_value(id, McpError::InvalidRequest(e.to_string()))),
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(error_value(
                id,
                McpError::InvalidRequest(format!("unsupported jsonrpc version {}", request.jsonrpc)),
            ));
        }

        let response = self.handle_request(request).await?;
        serde_json::to_value(response).ok()
    }

    /// Dispatch one request. Notifications yield `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let response = match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = request
                    .params
                    .and_then(|p| serde_json::from_value(p).ok())
                    .unwrap_or_default();
                JsonRpcResponse::success(id, self.initialize(&params))
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => match self.call_tool(request.params).await {
                Ok(result) => JsonRpcResponse::success(id, result),
                Err(e) => JsonRpcResponse::error(id, e.to_rpc_error()),
            },
            other => JsonRpcResponse::error(id, McpError::MethodNotFound(other.to_string()).into()),
        };

        Some(response)
    }

    fn initialize(&self, params: &InitializeParams) -> InitializeResult {
        if let Some(client) = &params.client_info {
            tracing::info!(client = %client.name, version = %client.version, "initialize");
        }

        InitializeResult {
            protocol_version: negotiate_protocol_version(params.protocol_version.as_deref())
                .to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: self.info.clone(),
        }
    }

    /// Route a `tools/call` to its handler.
    ///
    /// Handler failures come back as error content; only an unknown tool or
    /// unusable params are protocol errors.
    pub async fn call_tool(&self, params: Option<Value>) -> Result<CallToolResult, McpError> {
        let params: CallToolParams = params
            .ok_or_else(|| McpError::malformed("tools/call", "params are required"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| McpError::malformed("tools/call", e.to_string()))
            })?;

        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| McpError::UnknownTool(params.name.clone()))?;

        tracing::info!(tool = %params.name, "tool call");
        match tool.execute(params.arguments).await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "tool failed");
                Ok(CallToolResult::error(e.to_string()))
            }
        }
    }
}

fn error_value(id: Value, error: McpError) -> Value {
    serde_json::to_value(JsonRpcResponse::error(id, error.into())).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ToolContent;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn server_for(uri: &str) -> McpServer {
        let client = VercelClient::builder()
            .base_url(uri)
            .token("test-token")
            .build()
            .unwrap();
        build_server(&client, ServerInfo::default())
    }

    fn offline_server() -> McpServer {
        server_for("http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_initialize() {
        let server = offline_server();
        let response = server
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": {"name": "inspector", "version": "0.1"}
                }
            }))
            .await
            .unwrap();

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2025-03-26");
        assert_eq!(response["result"]["serverInfo"]["name"], "vercel-readonly");
        assert_eq!(response["result"]["capabilities"]["tools"]["listChanged"], false);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let server = offline_server();
        let response = server
            .handle_message(json!({"jsonrpc": "2.0", "id": "a", "method": "tools/list"}))
            .await
            .unwrap();

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "search");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["query"]));
        assert_eq!(tools[1]["name"], "fetch");
        assert_eq!(tools[1]["inputSchema"]["required"], json!(["id"]));
        assert_eq!(tools[1]["annotations"]["readOnlyHint"], true);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_protocol_error() {
        let server = offline_server();
        let response = server
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": {"name": "deploy", "arguments": {}}
            }))
            .await
            .unwrap();

        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(response["error"]["message"], "Unknown tool: deploy");
        assert!(response.get("result").is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = offline_server();
        let response = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 2, "method": "resources/list"}))
            .await
            .unwrap();

        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_invalid_requests() {
        let server = offline_server();

        let no_method = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 3}))
            .await
            .unwrap();
        assert_eq!(no_method["error"]["code"], -32600);
        assert_eq!(no_method["id"], 3);

        let bad_version = server
            .handle_message(json!({"jsonrpc": "1.0", "id": 4, "method": "ping"}))
            .await
            .unwrap();
        assert_eq!(bad_version["error"]["code"], -32600);

        let missing_params = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call"}))
            .await
            .unwrap();
        assert_eq!(missing_params["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = offline_server();

        assert!(server
            .handle_message(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await
            .is_none());
        assert!(server
            .handle_message(json!([{"jsonrpc": "2.0", "method": "notifications/cancelled"}]))
            .await
            .is_none());
        assert!(server
            .handle_message(json!({"jsonrpc": "2.0", "id": 9, "result": {}}))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_batch() {
        let server = offline_server();
        let response = server
            .handle_message(json!([
                {"jsonrpc": "2.0", "id": 1, "method": "ping"},
                {"jsonrpc": "2.0", "method": "notifications/initialized"},
                {"jsonrpc": "2.0", "id": 2, "method": "tools/list"}
            ]))
            .await
            .unwrap();

        let responses = response.as_array().unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[0]["result"], json!({}));
        assert_eq!(responses[1]["id"], 2);

        let empty = server.handle_message(json!([])).await.unwrap();
        assert_eq!(empty["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_fetch_malformed_input_is_content() {
        let server = offline_server();
        let result = server
            .call_tool(Some(json!({"name": "fetch", "arguments": {"id": ""}})))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
    }

    #[tokio::test]
    async fn test_search_call_end_to_end() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v10/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [{"name": "my-app", "id": "prj_1"}]
            })))
            .mount(&upstream)
            .await;
        Mock::given(method("GET"))
            .and(path("/v6/deployments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deployments": []})))
            .mount(&upstream)
            .await;

        let server = server_for(&upstream.uri());
        let result = server
            .call_tool(Some(json!({"name": "search", "arguments": {"query": "my-app"}})))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            vec![ToolContent::text("Project • my-app • id=prj_1")]
        );
    }
}
