//! stdio transport
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Responses are written one
//! per line; notifications produce no output.

use crate::config::ServerConfig;
use crate::handler::CoreHandler;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, instrument};

/// Run the MCP server with stdio transport
#[instrument(level = "info", skip(config))]
pub async fn run_stdio_server(config: &ServerConfig) -> anyhow::Result<()> {
    let handler = CoreHandler::from_config(config)?;

    info!("MCP server ready, listening on stdio");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        debug!(request = %line, "Received message");

        if let Some(response) = handler.handle_message(&line).await {
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    info!("stdin closed, stdio server stopped");
    Ok(())
}
