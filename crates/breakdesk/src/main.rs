// SPDX-FileCopyrightText: 2026 Breakdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Breakdesk - a chat assistant that takes equipment breakdown reports.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use breakdesk::{serve, show_config};
use clap::{Parser, Subcommand};

/// Breakdesk - a chat assistant that takes equipment breakdown reports.
#[derive(Parser, Debug)]
#[command(name = "breakdesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the chat server.
    Serve {
        /// Address to bind (overrides server.host).
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration with secrets masked.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => breakdesk_config::load_and_validate_path(path),
        None => breakdesk_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            breakdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("breakdesk: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match show_config::run(&config) {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("breakdesk: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("breakdesk: use --help for available commands");
        }
    }
}
