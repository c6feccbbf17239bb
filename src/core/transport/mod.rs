//! Transport layer for the MCP server.
//!
//! This module provides two transport implementations:
//! - **HTTP**: session-oriented JSON-RPC over HTTP - feature: `http`
//! - **STDIO**: standard input/output, one client per process - feature: `stdio`
//!
//! Both delegate tool execution to the same `McpServer`.
//!
//! # Feature Flags
//!
//! - `http` (default): HTTP transport - adds axum, tower, tower-http, uuid
//! - `stdio` (default): STDIO transport - minimal dependencies

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub mod jsonrpc;

#[cfg(feature = "http")]
pub mod registry;

#[cfg(feature = "http")]
pub mod session;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{SessionError, TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;

#[cfg(feature = "http")]
pub use registry::{SessionPolicy, SessionRegistry};
