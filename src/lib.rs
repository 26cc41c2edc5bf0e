//! Kali CTF Solver Library
//!
//! This library provides the core functionality for the Kali CTF Solver,
//! an MCP server that turns a Kali Linux host into a tool surface for
//! LLM-driven CTF work: command execution, file analysis, hash cracking,
//! and network reconnaissance, each reported back as readable text blocks.

pub mod config;
pub mod mcp;
pub mod tools;

pub use config::Config;
pub use mcp::McpServer;
