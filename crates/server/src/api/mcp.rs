use crate::config::AppState;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::StreamExt;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use vercel_mcp::protocol::{JsonRpcError, JsonRpcResponse};
use vercel_mcp::transport::{debug_preview, read_payload, BodyBuffer, ExchangeOutcome};
use vercel_mcp::{build_server, HttpExchange, McpError};

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Handle one MCP message over HTTP.
///
/// Each request gets its own server; it is released when the exchange
/// drops, which also happens if the client disconnects mid-request.
pub async fn handle_mcp(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    body: Body,
) -> Result<Response, BodyRejection> {
    let payload = read_body(body).await?;

    if params.get("debug").map(String::as_str) == Some("1") {
        return Ok(Json(debug_preview(payload.as_ref())).into_response());
    }

    let mut exchange = HttpExchange::open(build_server(&state.client, state.config.server_info()));
    let outcome = exchange.dispatch(payload).await;
    exchange.close();

    Ok(match outcome {
        ExchangeOutcome::Respond(response) => Json(response).into_response(),
        ExchangeOutcome::Accepted => StatusCode::ACCEPTED.into_response(),
        ExchangeOutcome::ParseError(response) => {
            tracing::warn!("Rejected unparseable request body");
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
    })
}

/// Buffer the streamed body and parse it; `None` when it is not JSON.
async fn read_body(body: Body) -> Result<Option<Value>, BodyRejection> {
    let mut buffer = BodyBuffer::new();
    let mut stream = body.into_data_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(BodyRejection::Interrupted)?;
        if buffer.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(BodyRejection::TooLarge);
        }
        buffer.push(chunk);
    }

    tracing::debug!(bytes = buffer.len(), chunks = buffer.chunks(), "request body received");
    let body = buffer.finish();
    Ok(read_payload(&body))
}

/// Why a request body was not read to completion.
#[derive(Debug)]
pub enum BodyRejection {
    /// The body grew past [`MAX_BODY_BYTES`].
    TooLarge,
    /// The client went away or the stream broke mid-body.
    Interrupted(axum::Error),
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::TooLarge => {
                tracing::warn!(limit = MAX_BODY_BYTES, "Request body too large");
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    JsonRpcError::invalid_request(format!(
                        "Request body exceeds {} bytes",
                        MAX_BODY_BYTES
                    )),
                )
            }
            Self::Interrupted(e) => {
                tracing::debug!(error = %e, "Request body interrupted");
                (
                    StatusCode::BAD_REQUEST,
                    JsonRpcError::from(McpError::BodyParse(
                        "request body was not received completely".to_string(),
                    )),
                )
            }
        };

        (status, Json(JsonRpcResponse::error(Value::Null, error))).into_response()
    }
}

/// Stateless mode has no standalone stream or session to delete.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(JsonRpcResponse::error(
            Value::Null,
            JsonRpcError::custom(-32000, "Method not allowed."),
        )),
    )
}
