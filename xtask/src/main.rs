use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Cargo Install"))
        .subcommand(Command::new("dev").about("Run the SSE server with debug logging"))
        .get_matches();

    match args.subcommand() {
        Some(("install", args)) => handle_install_command(args),
        Some(("dev", args)) => handle_dev_command(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn handle_install_command(_args: &ArgMatches) -> Result<()> {
    let mut command = process::Command::new("cargo");
    command
        .args(["install", "--path", "crates/mcp-sidecar-bin"])
        .status()?;

    Ok(())
}

fn handle_dev_command(_args: &ArgMatches) -> Result<()> {
    let mut command = process::Command::new("cargo");
    command
        .args(["run", "--package", "mcp-sidecar-bin", "--", "sse"])
        .env("RUST_LOG", "mcp_sidecar_core=debug,mcp_sidecar_bin=debug,info")
        .status()?;

    Ok(())
}
