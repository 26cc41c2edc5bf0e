// Kali CTF Solver - Main Entry Point
//
// An MCP server exposing Kali Linux CTF tooling to LLM agents:
// - serve (default): answer JSON-RPC 2.0 over stdio
// - tools: print the tool catalogue
// - exec: run one command through the same executor the server uses
//
// In serve mode stdout carries the protocol stream, so all logging goes
// to stderr.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kali_ctf_solver::config::Config;
use kali_ctf_solver::mcp::McpServer;
use kali_ctf_solver::tools::{catalog, CommandRunner, ShellExecutor};
use tracing_subscriber::EnvFilter;

/// Kali CTF Solver: an MCP server for CTF tooling on Kali Linux
#[derive(Parser, Debug)]
#[command(name = "kali-ctf-solver")]
#[command(version)]
#[command(about = "MCP server exposing Kali Linux CTF tooling over stdio", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to a TOML config file (defaults to the XDG config location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve MCP over stdio (the default when no command is given)
    Serve,
    /// Print the tool catalogue as JSON
    Tools,
    /// Run a single command through the executor and print the report
    Exec {
        /// The command line to run
        command: String,

        /// Working directory for the command
        #[arg(long)]
        working_directory: Option<String>,

        /// Timeout in seconds (defaults to the configured timeout)
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    init_tracing(&args, &config)?;

    match args.command {
        None | Some(Commands::Serve) => {
            let server = McpServer::new(&config);
            server.run_stdio().await?;
        }
        Some(Commands::Tools) => {
            let listing = serde_json::to_string_pretty(&catalog())
                .context("Failed to serialize tool catalogue")?;
            println!("{}", listing);
        }
        Some(Commands::Exec {
            command,
            working_directory,
            timeout,
        }) => {
            let executor = ShellExecutor::new();
            let outcome = executor
                .run(
                    &command,
                    working_directory.as_deref().map(Path::new),
                    timeout.unwrap_or(config.execution.default_timeout_secs),
                )
                .await;
            println!("{}", outcome.render(&command));
        }
    }

    Ok(())
}

/// Initialize tracing on stderr in the configured format
fn init_tracing(args: &Args, config: &Config) -> Result<()> {
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format.to_lowercase().as_str() {
        "json" => builder.json().init(),
        "pretty" => builder.pretty().init(),
        _ => builder.compact().init(),
    }

    Ok(())
}
