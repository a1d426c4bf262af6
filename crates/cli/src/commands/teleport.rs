//! Dry-run a player-to-player teleport.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use runtime::{InMemoryPlayers, RecordingExecutor, RuntimeError, TeleportService};

use crate::utils::{load_catalog, read_to_string};

/// Run a player-to-player teleport against recorded players
#[derive(Parser)]
pub struct Teleport {
    /// JSON object mapping player names to player data
    #[arg(value_name = "PLAYERS_JSON")]
    players: PathBuf,

    /// Player being teleported
    player: String,

    /// Player to teleport to
    target: String,

    /// Teleport document (TOML or JSON); built-in defaults if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Teleport {
    pub fn execute(self) -> Result<ExitCode> {
        let players = InMemoryPlayers::from_json(&read_to_string(&self.players)?)
            .with_context(|| format!("Failed to parse players: {}", self.players.display()))?;
        let executor = Arc::new(RecordingExecutor::new());

        let service = TeleportService::builder()
            .catalog(load_catalog(self.config.as_deref())?)
            .players(Arc::new(players))
            .executor(executor.clone())
            .build()?;

        match service.teleport_to_player(&self.player, &self.target) {
            Ok(_) => {
                println!("{}", style("Executed:").bold().cyan());
                for command in executor.commands() {
                    println!("  {command}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err @ (RuntimeError::Cost(_) | RuntimeError::SelfTeleport(_))) => {
                println!("{} {}", style("Refused:").bold().red(), err);
                Ok(ExitCode::FAILURE)
            }
            Err(err) => Err(err.into()),
        }
    }
}
