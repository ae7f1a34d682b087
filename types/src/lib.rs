//! Shared types for the partdex catalog agent connector.
//!
//! This crate contains the wire-protocol messages exchanged with the MCP
//! tool server and the catalog record types shared between the client and
//! its consumers.

pub mod component;
pub mod wire;

// Re-export commonly used types
pub use component::Component;
pub use wire::{ParsedEvent, ServerEvent, ToolCallRequest};
