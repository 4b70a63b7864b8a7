// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Civiq - civic complaint intake and triage service.
//!
//! This is the binary entry point for the Civiq server.

mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Civiq - civic complaint intake and triage service.
#[derive(Parser, Debug)]
#[command(name = "civiq", version, about, long_about = None)]
struct Cli {
    /// Path to a config file (overrides the XDG hierarchy).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Civiq HTTP server.
    Serve,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match &cli.config {
        Some(path) => civiq_config::load_and_validate_path(path),
        None => civiq_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            civiq_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    // CIVIQ_LOG wins over the configured level.
    let filter = EnvFilter::try_from_env("CIVIQ_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                tracing::error!("server exited with error: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("civiq: use `civiq serve` to start the server, or --help for options");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config = civiq_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.admin.alert_threshold, 5);
    }
}
