//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the MCP server handler and the transport
//! layer. Nothing here knows about dev.to beyond the backend settings.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{BackendConfig, Config, LogFormat, LoggingConfig, SessionConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
