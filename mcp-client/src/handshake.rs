//! Handshake stream connector.
//!
//! Opens the long-lived event stream against the MCP endpoint, scans it
//! for the first `data:` line and extracts the session from the
//! submission address that line carries. No retry happens here; the
//! caller decides whether to construct a new client and try again.

use crate::error::{McpClientError, Result};
use crate::lines::{data_payload, LineReader};
use crate::session::Session;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, info};

/// Open the handshake stream and extract the session.
///
/// The whole exchange, from the request through the line scan, is
/// bounded by `connect_timeout`; on expiry the stream is dropped and
/// `ConnectTimeout` is returned. On success the stream is released
/// immediately, it is not read past the handshake line.
pub(crate) async fn connect(
    http: &Client,
    endpoint: &Url,
    connect_timeout: Duration,
) -> Result<Session> {
    debug!("opening handshake stream to {}", endpoint);
    tokio::time::timeout(connect_timeout, handshake(http, endpoint))
        .await
        .map_err(|_| McpClientError::ConnectTimeout(endpoint.clone()))?
}

async fn handshake(http: &Client, endpoint: &Url) -> Result<Session> {
    let response = http
        .get(endpoint.clone())
        .send()
        .await
        .map_err(McpClientError::Transport)?
        .error_for_status()
        .map_err(McpClientError::Transport)?;

    let mut lines = LineReader::new(response);
    while let Some(line) = lines.next_line().await.map_err(McpClientError::Read)? {
        // The first data line decides the outcome either way.
        if let Some(address) = data_payload(&line) {
            let session = resolve_session(endpoint, address)?;
            info!(
                session_id = %session.session_id,
                messages_url = %session.messages_url,
                "MCP session established"
            );
            return Ok(session);
        }
    }
    Err(McpClientError::HandshakeMissing)
}

/// Resolve a submission-address candidate against the endpoint and
/// extract the session from it. Relative references become absolute here.
fn resolve_session(endpoint: &Url, address: &str) -> Result<Session> {
    let messages_url = endpoint
        .join(address)
        .map_err(|_| McpClientError::SessionIdMissing(address.to_string()))?;
    Session::from_messages_url(messages_url)
        .ok_or_else(|| McpClientError::SessionIdMissing(address.to_string()))
}
