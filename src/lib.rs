//! dev.to MCP Server Library
//!
//! Exposes the public dev.to REST API as Model Context Protocol tools:
//! listing, fetching and searching articles, user profiles, tags and
//! comments. Every tool maps to exactly one unauthenticated GET and returns
//! the backend JSON unchanged, pretty-printed in a single text block.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and the
//!   transports (session-oriented HTTP, STDIO)
//! - **domains**
//!   - **devto**: the backend client, its parameter sets and errors
//!   - **tools**: one MCP tool per backend operation
//!
//! # Example
//!
//! ```rust,no_run
//! use devto_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport, config.sessions)
//!         .run(server)
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
