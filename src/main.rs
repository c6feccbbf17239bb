//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, and starts the dev.to MCP
//! server with the configured transport.

use anyhow::{Context, Result};
use tracing::{Instrument, Level, info, info_span};
use tracing_subscriber::{EnvFilter, fmt};

use devto_mcp_server::core::{Config, LogFormat, LoggingConfig, McpServer, TransportService};

#[cfg(feature = "http")]
use devto_mcp_server::core::TransportConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so configuration warnings reach the subscriber
    let logging = LoggingConfig::from_env();
    init_logging(&logging.level, logging.format);

    // Load configuration from environment
    let config = Config::from_env();

    let span = info_span!(
        "server",
        service = %config.server.name,
        version = %config.server.version,
        environment = %config.environment,
    );

    async move {
        info!("Starting {} v{}", config.server.name, config.server.version);

        #[cfg(feature = "http")]
        #[allow(irrefutable_let_patterns)]
        if let TransportConfig::Http(http) = &config.transport {
            info!(port = http.port, environment = %config.environment, "HTTP server starting");
        }

        let server = McpServer::new(config.clone()).context("failed to build MCP server")?;
        info!(base_url = %config.backend.base_url, "Server initialized");

        let transport = TransportService::new(config.transport.clone(), config.sessions.clone());
        transport.run(server).await?;

        info!("Server shutting down");
        Ok::<(), anyhow::Error>(())
    }
    .instrument(span)
    .await
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so the STDIO transport keeps stdout for protocol
/// traffic. `RUST_LOG` directives refine the configured level.
fn init_logging(level: &str, format: LogFormat) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    match format {
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .init(),
    }
}
