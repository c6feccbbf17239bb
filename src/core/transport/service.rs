//! Transport service - starts the configured transport.

use tracing::info;

use super::TransportConfig;
use crate::core::{McpServer, Result};
use crate::core::config::SessionConfig;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "http")]
use super::{http::HttpTransport, registry::SessionPolicy};

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    sessions: SessionConfig,
}

impl TransportService {
    /// Create a new transport service.
    ///
    /// `sessions` only matters to the HTTP transport.
    pub fn new(config: TransportConfig, sessions: SessionConfig) -> Self {
        Self { config, sessions }
    }

    /// Start the transport with the given MCP server.
    ///
    /// This method blocks until the transport is shut down.
    pub async fn run(self, server: McpServer) -> Result<()> {
        info!("Starting transport: {}", self.config.description());

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server).await?,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => {
                let policy = SessionPolicy::from_config(&self.sessions);
                HttpTransport::new(cfg).run(server, policy).await?
            }
        }

        Ok(())
    }
}
