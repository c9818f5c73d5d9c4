// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Warden - an LLM-driven chat-server steward bot.
//!
//! This is the binary entry point for the Warden bot.

mod doctor;
mod shell;
mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Warden - an LLM-driven chat-server steward bot.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive shell session against an in-memory guild.
    Shell,
    /// Show score, success rate, and store counts.
    Status {
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Check configuration, store directory, and Ollama reachability.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match warden_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            warden_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        Some(Commands::Status { json }) => status::run_status(&config, json),
        Some(Commands::Doctor) => doctor::run_doctor(&config).await,
        Some(Commands::Shell) | None => shell::run_shell(config).await,
    };

    if let Err(e) = result {
        eprintln!("warden: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber, honoring `RUST_LOG` over the config level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
