use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mcp-sidecar")]
#[command(author, version, about = "MCP server with tools, prompts and real-time search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the MCP server over SSE (HTTP)
    Sse {
        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Run the MCP server using stdio transport
    Stdio,
    /// Show all available tools with their MCP naming convention
    Tools {
        /// Custom server name to use in tool names
        #[arg(long, default_value = "sidecar")]
        name: String,
    },
}
