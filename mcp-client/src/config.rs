//! Client configuration.

use reqwest::Url;
use std::time::Duration;

/// Default bound on connection establishment plus handshake scan.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on a single tool invocation, submission through the
/// arrival of its correlated event.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for the protocol client.
///
/// The endpoint and the two timeouts are the whole configuration surface;
/// both timeouts are independent of each other.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// MCP endpoint the handshake stream is opened against.
    pub endpoint: Url,
    /// Bound on the handshake exchange.
    pub connect_timeout: Duration,
    /// Per-call bound on awaiting a correlated tool result.
    pub call_timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default timeouts.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}
