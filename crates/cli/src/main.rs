//! Offline quoting tool for teleport costs.
//!
//! Loads a teleport document (or the built-in defaults) and answers what a
//! move would cost and which commands it would run, without a server.

mod commands;
mod utils;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Quote, Teleport};

/// Teleport cost tools
#[derive(Parser)]
#[command(name = "teleport-cost")]
#[command(about = "Price teleports and preview their commands", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Price a move between two coordinates
    Quote(Quote),

    /// Charge a recorded player for a move and print the commands
    Check(Check),

    /// Run a player-to-player teleport against recorded players
    Teleport(Teleport),
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Quote(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
        Command::Teleport(cmd) => cmd.execute(),
    }
}
