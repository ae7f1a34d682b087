//! SSE protocol client for the partdex catalog tool server.
//!
//! The server speaks a fixed dialect: a long-lived handshake stream hands
//! out a session identifier and a message-submission address, tool calls
//! are POSTed there as uniquely identified JSON envelopes, and each call
//! reads its own response stream until the event carrying its correlation
//! id arrives.
//!
//! ## Lifecycle
//!
//! A [`McpClient`] is constructed unestablished, populated at most once by
//! a successful handshake, used for any number of concurrent invocations,
//! and then discarded. A failed handshake is terminal for the instance;
//! construct a new client to retry. Per-call failures never poison the
//! session.

pub mod client;
pub mod config;
pub mod correlate;
pub mod error;
pub mod registry;
pub mod session;

mod dispatch;
mod handshake;
mod lines;

pub use client::McpClient;
pub use config::ClientConfig;
pub use error::{McpClientError, Result};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use session::{Session, SessionState};
