//! Tool-call submission and response await.

use crate::correlate::{Outcome, ResponseCorrelator};
use crate::error::{McpClientError, Result};
use crate::lines::LineReader;
use crate::session::Session;
use partdex_types::wire::ToolCallRequest;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Submit one tool call and await its correlated result.
///
/// The submission POST and the full read of the response stream are
/// bounded together by `call_timeout`; the future is dropped on expiry,
/// which aborts the connection. Each call runs over its own private
/// connection pair; nothing here mutates the session.
pub(crate) async fn invoke(
    http: &Client,
    session: &Session,
    envelope: ToolCallRequest,
    call_timeout: Duration,
) -> Result<Value> {
    debug!(
        tool = %envelope.tool_name,
        request_id = %envelope.id,
        "submitting tool call to {}",
        session.messages_url
    );
    tokio::time::timeout(call_timeout, submit_and_await(http, session, envelope))
        .await
        .map_err(|_| McpClientError::ResponseTimeout(call_timeout))?
}

async fn submit_and_await(
    http: &Client,
    session: &Session,
    envelope: ToolCallRequest,
) -> Result<Value> {
    let response = http
        .post(session.messages_url.clone())
        .header(ACCEPT, "text/event-stream")
        .json(&envelope)
        .send()
        .await
        .map_err(McpClientError::Submission)?
        .error_for_status()
        .map_err(McpClientError::Submission)?;

    let mut correlator = ResponseCorrelator::new(envelope.id.as_str());
    let mut lines = LineReader::new(response);
    while let Some(line) = lines.next_line().await.map_err(McpClientError::Read)? {
        if let Some(outcome) = correlator.observe(&line) {
            return match outcome {
                Outcome::Result(output) => Ok(output),
                Outcome::RemoteError(message) => Err(McpClientError::RemoteTool(message)),
                Outcome::Malformed(raw) => Err(McpClientError::Malformed(raw)),
            };
        }
    }
    Err(McpClientError::StreamEnded)
}
