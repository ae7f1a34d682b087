//! The owned client instance tying session, registry and dispatch together.

use crate::config::ClientConfig;
use crate::dispatch;
use crate::error::{McpClientError, Result};
use crate::handshake;
use crate::registry::{self, ToolRegistry};
use crate::session::{Session, SessionState};
use partdex_types::wire::ToolCallRequest;
use reqwest::Client;
use serde_json::{json, Value};

/// Client for the catalog MCP tool server.
///
/// Lifecycle: constructed unestablished, populated at most once by
/// [`establish`](McpClient::establish), used for any number of concurrent
/// invocations, then discarded. A client whose handshake failed is not
/// retried internally; construct a new instance instead. Per-call
/// failures never poison the session.
#[derive(Debug)]
pub struct McpClient {
    config: ClientConfig,
    http: Client,
    registry: ToolRegistry,
    state: SessionState,
}

impl McpClient {
    /// Create an unestablished client.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
            registry: ToolRegistry::catalog(),
            state: SessionState::default(),
        }
    }

    /// Build a client and perform the handshake in one step.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let mut client = Self::new(config);
        client.establish().await?;
        Ok(client)
    }

    /// Perform the handshake and populate the session.
    ///
    /// On an already established client this is a no-op returning the
    /// existing session; the session is never repopulated. A handshake
    /// failure latches: the attempt's error is returned once and every
    /// later call fails with `Unestablished` without touching the
    /// network again.
    pub async fn establish(&mut self) -> Result<&Session> {
        if let SessionState::Failed = self.state {
            return Err(McpClientError::Unestablished);
        }
        if !self.state.is_established() {
            let attempt = handshake::connect(
                &self.http,
                &self.config.endpoint,
                self.config.connect_timeout,
            )
            .await;
            match attempt {
                Ok(session) => self.state = SessionState::Established(session),
                Err(error) => {
                    self.state = SessionState::Failed;
                    return Err(error);
                }
            }
        }
        match &self.state {
            SessionState::Established(session) => Ok(session),
            _ => Err(McpClientError::Unestablished),
        }
    }

    /// The established session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    /// The tools this client can invoke.
    pub fn tools(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke a tool by name.
    ///
    /// The input is not validated against the tool's schema; malformed
    /// input surfaces as a remote error event, not a local rejection.
    /// Requires an established session and a registered tool name.
    pub async fn invoke(&self, tool_name: &str, input: Value) -> Result<Value> {
        let session = self.state.session().ok_or(McpClientError::Unestablished)?;
        if self.registry.describe(tool_name).is_none() {
            return Err(McpClientError::UnknownTool(tool_name.to_string()));
        }
        let input = self.registry.normalize_input(tool_name, input);
        let envelope = ToolCallRequest::new(tool_name, input);
        dispatch::invoke(&self.http, session, envelope, self.config.call_timeout).await
    }

    /// List every component in the catalog.
    pub async fn list_components(&self) -> Result<Value> {
        self.invoke(registry::LIST_COMPONENTS, json!({})).await
    }

    /// Search components by name or model.
    pub async fn search_components(&self, query: &str) -> Result<Value> {
        self.invoke(registry::SEARCH_COMPONENTS, json!({ "query": query }))
            .await
    }

    /// Get full details for one component by id.
    ///
    /// Accepts the id as text; the registry's coercion rule applies, so
    /// `"42"` goes out numeric and non-numeric text goes out raw.
    pub async fn get_component(&self, component_id: &str) -> Result<Value> {
        self.invoke(
            registry::GET_COMPONENT,
            json!({ "component_id": component_id }),
        )
        .await
    }
}
