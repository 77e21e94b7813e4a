//! # Tasklet CLI Module
//!
//! This module implements the CLI interface for Tasklet.
//!
//! ## Available Commands
//!
//! - `serve` - Start the HTTP server (also the default when no command is
//!   given)
//!
//! The store is in-memory and scoped to the server process, so there are no
//! offline subcommands; everything else happens over HTTP.

use crate::api;
use clap::{Parser, Subcommand};
use tasklet_core::TodoService;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Tasklet - task-tracking HTTP service
///
/// An in-memory todo server: create, list, filter, sort, paginate,
/// complete and delete task records over a REST API.
#[derive(Parser, Debug)]
#[command(name = "tasklet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> std::io::Result<()> {
    match cli.command {
        Some(Commands::Serve { host, port }) => serve(&host, port).await,
        // No subcommand - start the server with defaults
        None => serve(DEFAULT_HOST, DEFAULT_PORT).await,
    }
}

/// Start the HTTP server over a fresh in-memory store.
async fn serve(host: &str, port: u16) -> std::io::Result<()> {
    let addr = format!("{host}:{port}");

    println!("Tasklet server starting...");
    println!();
    println!("Configuration:");
    println!("  Host:  {}", host);
    println!("  Port:  {}", port);
    println!("  Store: in-memory (state is lost on shutdown)");
    println!();

    api::run_server(&addr, TodoService::new()).await
}
