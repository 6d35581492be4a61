use anyhow::Result;
use clap::Parser;
use mcp_sidecar_core::{CoreHandler, ServerConfig};
use std::io::IsTerminal;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with TTY detection for conditional ANSI colors.
    // Everything goes to stderr so the stdio transport keeps stdout clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("mcp_sidecar_core=info,mcp_sidecar_bin=info,info"));

    fmt()
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sse { port } => {
            let mut config = ServerConfig::from_env();
            if let Some(port) = port {
                config = config.with_port(port);
            }
            info!(port = config.port, "Starting MCP server with SSE transport");
            mcp_sidecar_core::run_sse_server(&config).await
        }
        Commands::Stdio => {
            let config = ServerConfig::from_env();
            info!("Starting MCP server with stdio transport");
            mcp_sidecar_core::run_stdio_server(&config).await
        }
        Commands::Tools { name } => {
            list_tools(&name)?;
            Ok(())
        }
    }
}

fn list_tools(name: &str) -> Result<()> {
    let config = ServerConfig::from_env();
    let handler = CoreHandler::from_config(&config)?;

    for tool in handler.tool_descriptors() {
        println!("mcp__{}__{}", name, tool.name);
    }
    Ok(())
}
