//! Failure taxonomy for the protocol client.

use reqwest::Url;
use std::time::Duration;

/// Error type for protocol client operations.
///
/// Each failure kind a caller needs to tell apart (retry, reformulate,
/// abort) is its own variant; nothing is collapsed into a generic error.
/// Handshake failures are terminal for the client instance, per-call
/// failures are not.
#[derive(Debug, thiserror::Error)]
pub enum McpClientError {
    /// The connect timeout elapsed before the handshake completed.
    #[error("timed out connecting to {0}")]
    ConnectTimeout(Url),

    /// Network or HTTP failure while opening the handshake stream.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The underlying stream broke while reading event lines.
    #[error("stream read error: {0}")]
    Read(#[source] std::io::Error),

    /// The handshake stream ended without any `data:` line.
    #[error("stream ended without a handshake line")]
    HandshakeMissing,

    /// A handshake line was found, but no session_id could be extracted
    /// from its submission address.
    #[error("no session_id in submission address: {0}")]
    SessionIdMissing(String),

    /// Network or HTTP failure while submitting a tool call.
    #[error("failed to submit tool call: {0}")]
    Submission(#[source] reqwest::Error),

    /// The per-call timeout elapsed with no correlated response.
    #[error("no tool result within {0:?}")]
    ResponseTimeout(Duration),

    /// The server reported an in-band error event for this call.
    #[error("server reported error: {0}")]
    RemoteTool(String),

    /// A `data:` line on the response stream could not be parsed.
    #[error("malformed event line: {0}")]
    Malformed(String),

    /// The response stream closed before any matching event arrived.
    #[error("stream ended without a matching tool result")]
    StreamEnded,

    /// The client has no established session.
    #[error("session not established")]
    Unestablished,

    /// The tool name does not resolve in the registry.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

pub type Result<T> = std::result::Result<T, McpClientError>;
