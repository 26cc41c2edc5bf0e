//! MCP (Model Context Protocol) Server Implementation
//!
//! A from-scratch MCP server over stdio, written directly against the
//! JSON-RPC 2.0 framing with Tokio and Serde rather than an SDK.
//!
//! Two layers:
//!
//! 1. [`protocol`]: the wire types (JSON-RPC envelopes and MCP entities)
//! 2. [`server`]: the line-delimited stdio loop and method dispatch
//!
//! Tool failures never become protocol faults; they travel back to the
//! caller as readable text so an agent can adjust and retry.

pub mod protocol;
pub mod server;

pub use protocol::{
    McpError, McpMethod, McpRequest, McpResponse, RequestId, Resource, ResourceContents,
    ServerCapabilities, ServerInfo, Tool, ToolCallParams, ToolCallResult,
};

pub use server::{McpServer, INSTRUCTIONS_URI, PROMPT_NAME, SERVER_NAME};

#[cfg(test)]
mod proptests;
