//! `ofb`: track employee and associate offboarding from the terminal, or
//! serve the same operations to AI assistants over MCP.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, OffboardMcpServer};
use offboard_core::{params::ListProcesses, OffboardingBuilder};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let service = OffboardingBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to open the offboarding database")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("ofb started");

    match command {
        Some(Template { command }) => {
            Cli::new(service, renderer)
                .handle_template_command(command)
                .await
        }
        Some(Process { command }) => {
            Cli::new(service, renderer)
                .handle_process_command(command)
                .await
        }
        Some(Task { command }) => Cli::new(service, renderer).handle_task_command(command).await,
        Some(Person { command }) => {
            Cli::new(service, renderer)
                .handle_person_command(command)
                .await
        }
        Some(Seed(args)) => Cli::new(service, renderer).seed(&args.into()).await,
        Some(Serve) => {
            info!("Starting offboarding MCP server");
            run_stdio_server(OffboardMcpServer::new(service))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(service, renderer)
                .list_processes(&ListProcesses::default())
                .await
        }
    }
}
