//! Per-call response correlation.
//!
//! Each invocation owns a private response stream and a
//! [`ResponseCorrelator`] bound to its correlation id. The correlator is
//! a small state machine driven one line at a time; timeouts and stream
//! exhaustion are judged by the driver in `dispatch`, which owns the
//! stream and the deadline.

use partdex_types::wire::{ParsedEvent, ServerEvent};
use serde_json::Value;
use tracing::{debug, warn};

use crate::lines::data_payload;

/// Terminal outcome of a correlation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A tool_result matched the awaited correlation id. The payload is
    /// returned verbatim, never reinterpreted.
    Result(Value),
    /// The server reported an in-band error.
    RemoteError(String),
    /// A `data:` line could not be parsed as a protocol record.
    Malformed(String),
}

/// Matches response-stream events against one outstanding request.
#[derive(Debug)]
pub struct ResponseCorrelator {
    request_id: String,
    done: bool,
}

impl ResponseCorrelator {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            done: false,
        }
    }

    /// Feed one line from the response stream.
    ///
    /// Returns `None` while still awaiting a match and a terminal
    /// [`Outcome`] once the call is decided. Once terminal, the
    /// correlator must not be fed further lines; a duplicate result for
    /// the same id is therefore never observed (first match wins).
    pub fn observe(&mut self, line: &str) -> Option<Outcome> {
        debug_assert!(!self.done, "correlator observed a line after completion");
        let outcome = self.classify(line);
        if outcome.is_some() {
            self.done = true;
        }
        outcome
    }

    fn classify(&self, line: &str) -> Option<Outcome> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            // Keep-alive.
            return None;
        }
        let Some(payload) = data_payload(trimmed) else {
            debug!("ignoring non-data line on response stream: {}", trimmed);
            return None;
        };
        match ParsedEvent::parse(payload) {
            Err(error) => {
                warn!("malformed event on response stream: {}", error);
                Some(Outcome::Malformed(payload.to_string()))
            }
            Ok(ParsedEvent::Unrecognized(value)) => {
                debug!("ignoring unrecognized event: {}", value);
                None
            }
            Ok(ParsedEvent::Recognized(ServerEvent::ToolResult {
                request_id,
                tool_output,
            })) => {
                if request_id == self.request_id {
                    Some(Outcome::Result(tool_output))
                } else {
                    // One call, one stream: a foreign id is a protocol
                    // violation by the server, not fatal to this call.
                    warn!(
                        expected = %self.request_id,
                        received = %request_id,
                        "discarding tool_result for a different request"
                    );
                    None
                }
            }
            Ok(ParsedEvent::Recognized(ServerEvent::Error { message, .. })) => {
                // Session-level errors may carry no request_id; either
                // way the awaiting call owns them.
                Some(Outcome::RemoteError(message))
            }
        }
    }
}
