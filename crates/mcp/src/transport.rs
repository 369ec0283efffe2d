// Per-request transport: body framing and the one-shot server exchange

use crate::error::McpError;
use crate::protocol::JsonRpcResponse;
use crate::server::McpServer;
use bytes::{Bytes, BytesMut};
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

/// Accumulates the raw request body as chunks arrive.
#[derive(Debug, Default)]
pub struct BodyBuffer {
    buf: BytesMut,
    chunks: usize,
}

impl BodyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: impl AsRef<[u8]>) {
        self.buf.extend_from_slice(chunk.as_ref());
        self.chunks += 1;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn chunks(&self) -> usize {
        self.chunks
    }

    /// Concatenated body, ready for decoding.
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Decode the body as UTF-8 text. Empty or invalid bodies are absent.
pub fn decode_body(body: &[u8]) -> Option<&str> {
    if body.is_empty() {
        return None;
    }
    std::str::from_utf8(body).ok()
}

/// Parse the body text as JSON.
///
/// Some clients send the message as a JSON string holding the encoded
/// message; that string is parsed once more. Any failure yields `None`.
pub fn parse_payload(text: &str) -> Option<Value> {
    match serde_json::from_str(text).ok()? {
        Value::String(inner) => serde_json::from_str(&inner).ok(),
        value => Some(value),
    }
}

/// Decode and parse a finished body in one step.
pub fn read_payload(body: &[u8]) -> Option<Value> {
    decode_body(body).and_then(parse_payload)
}

/// Shape of a parsed payload for the debug probe.
///
/// Arrays and `null` report as `"object"`. Absent members are left out of
/// the preview, as is the preview itself when nothing parsed.
pub fn debug_preview(payload: Option<&Value>) -> Value {
    let parsed_type = match payload {
        None => "undefined",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Null | Value::Array(_) | Value::Object(_)) => "object",
    };

    let mut probe = serde_json::Map::new();
    probe.insert("parsedType".to_string(), Value::from(parsed_type));

    match payload {
        Some(Value::Object(map)) => {
            let mut preview = serde_json::Map::new();
            for key in ["jsonrpc", "method"] {
                if let Some(value) = map.get(key) {
                    preview.insert(key.to_string(), value.clone());
                }
            }
            preview.insert(
                "hasParams".to_string(),
                Value::Bool(map.get("params").is_some_and(is_truthy)),
            );
            probe.insert("parsedPreview".to_string(), Value::Object(preview));
        }
        Some(Value::Array(_)) => {
            probe.insert("parsedPreview".to_string(), serde_json::json!({"hasParams": false}));
        }
        Some(other) => {
            probe.insert("parsedPreview".to_string(), other.clone());
        }
        None => {}
    }

    Value::Object(probe)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// What to write back for one exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeOutcome {
    /// A JSON-RPC response (or batch of responses).
    Respond(Value),
    /// Only notifications were received; nothing to send.
    Accepted,
    /// The body could not be parsed.
    ParseError(Value),
}

/// One server bound to one request/response pair.
///
/// The server is released when the exchange is dropped, including when the
/// connection closes before a response is written.
pub struct HttpExchange {
    id: Uuid,
    server: Option<McpServer>,
    opened: Instant,
}

impl HttpExchange {
    pub fn open(server: McpServer) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(exchange = %id, "exchange opened");
        Self {
            id,
            server: Some(server),
            opened: Instant::now(),
        }
    }

    /// Dispatch the parsed payload. The exchange serves a single payload.
    pub async fn dispatch(&mut self, payload: Option<Value>) -> ExchangeOutcome {
        let Some(payload) = payload else {
            return ExchangeOutcome::ParseError(parse_error_value());
        };

        let Some(server) = self.server.take() else {
            return ExchangeOutcome::Respond(internal_error_value("exchange already used"));
        };

        match server.handle_message(payload).await {
            Some(response) => ExchangeOutcome::Respond(response),
            None => ExchangeOutcome::Accepted,
        }
    }

    /// Release the server now rather than at end of scope.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for HttpExchange {
    fn drop(&mut self) {
        let dispatched = self.server.take().is_none();
        tracing::debug!(
            exchange = %self.id,
            elapsed_ms = self.opened.elapsed().as_millis() as u64,
            dispatched,
            "exchange closed"
        );
    }
}

fn parse_error_value() -> Value {
    let err = McpError::BodyParse("request body is not valid JSON".to_string());
    serde_json::to_value(JsonRpcResponse::error(Value::Null, err.into())).unwrap_or(Value::Null)
}

fn internal_error_value(message: &str) -> Value {
    serde_json::to_value(JsonRpcResponse::error(
        Value::Null,
        crate::protocol::JsonRpcError::internal_error(message),
    ))
    .unwrap_or(Value::Null)
}
