//! # Tasklet - Task-Tracking Server
//!
//! The main binary for the Tasklet todo service.
//!
//! This application provides:
//! - HTTP REST API server (axum-based) over a single in-memory collection
//! - CLI interface (clap)
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/tasklet (THE BINARY)        │
//! │                                               │
//! │   ┌─────────────┐        ┌─────────────┐      │
//! │   │   CLI       │        │   HTTP API  │      │
//! │   │  (clap)     │        │   (axum)    │      │
//! │   └──────┬──────┘        └──────┬──────┘      │
//! │          │                      │             │
//! │          └──────────┬───────────┘             │
//! │                     ▼                         │
//! │            ┌────────────────┐                 │
//! │            │  tasklet-core  │                 │
//! │            │  (THE LOGIC)   │                 │
//! │            └────────────────┘                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! tasklet serve --host 0.0.0.0 --port 8080
//!
//! # Defaults (127.0.0.1:8080)
//! tasklet
//! ```

use clap::Parser;
use tasklet::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — TASKLET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("TASKLET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tasklet=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Tasklet startup banner.
fn print_banner() {
    println!(
        r#"
  ████████╗ █████╗ ███████╗██╗  ██╗██╗     ███████╗████████╗
  ╚══██╔══╝██╔══██╗██╔════╝██║ ██╔╝██║     ██╔════╝╚══██╔══╝
     ██║   ███████║███████╗█████╔╝ ██║     █████╗     ██║
     ██║   ██╔══██║╚════██║██╔═██╗ ██║     ██╔══╝     ██║
     ██║   ██║  ██║███████║██║  ██╗███████╗███████╗   ██║
     ╚═╝   ╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚══════╝╚══════╝   ╚═╝

  Task-Tracking Server v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
