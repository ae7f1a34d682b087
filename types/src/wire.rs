//! Wire-protocol messages exchanged with the MCP tool server.
//!
//! The SSE dialect is fixed: the handshake stream carries the submission
//! address in a `data:` line, tool calls are POSTed as JSON envelopes, and
//! response events arrive as `data: <json>` lines.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A tool invocation envelope submitted to the session's message endpoint.
///
/// Serializes to exactly
/// `{"type":"tool_call","id":"<uuid>","tool_name":"...","tool_input":{...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    #[serde(rename = "type")]
    pub kind: String,
    /// Correlation id echoed back as `request_id` in the matching result.
    pub id: String,
    pub tool_name: String,
    pub tool_input: Value,
}

impl ToolCallRequest {
    /// Build an envelope with a freshly generated correlation id.
    pub fn new(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            kind: "tool_call".to_string(),
            id: Uuid::new_v4().to_string(),
            tool_name: tool_name.into(),
            tool_input,
        }
    }
}

/// Events the server emits on a response stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A completed tool call, correlated via `request_id`.
    ToolResult { request_id: String, tool_output: Value },
    /// An in-band error. Session-level errors carry no `request_id`.
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
}

/// Outcome of parsing one `data:` payload.
#[derive(Debug, Clone)]
pub enum ParsedEvent {
    /// A record with a known tag and well-formed fields.
    Recognized(ServerEvent),
    /// Valid JSON with an unknown tag; protocol noise, not an error.
    Unrecognized(Value),
}

impl ParsedEvent {
    /// Parse a `data:` payload.
    ///
    /// Returns `Err` for invalid JSON and for records that claim a known
    /// tag but are missing required fields; both count as malformed.
    pub fn parse(payload: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(payload)?;
        match value.get("type").and_then(Value::as_str) {
            Some("tool_result") | Some("error") => {
                serde_json::from_value(value).map(ParsedEvent::Recognized)
            }
            _ => Ok(ParsedEvent::Unrecognized(value)),
        }
    }
}
