//! Charge one recorded player for a move.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use cost_content::routes;
use cost_core::{Command, ConsumptionError, CostStrategyError, Position, ResourceState, Vec3};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::PlayerSnapshot;
use serde::Serialize;

use crate::utils::{OutputFormat, load_catalog, parse_vec3, read_to_string};

/// Charge a recorded player for a move and print the commands
#[derive(Parser)]
pub struct Check {
    /// Player data document (NBT as JSON)
    #[arg(value_name = "PLAYER_JSON")]
    player: PathBuf,

    /// Destination as `x,y,z`
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    to: Vec3,

    /// Destination dimension; the player's own dimension if omitted
    #[arg(long)]
    dimension: Option<String>,

    /// Route whose strategy prices the move
    #[arg(short, long, default_value = routes::TO_WAYPOINT)]
    route: String,

    /// Teleport document (TOML or JSON); built-in defaults if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for random strategies; entropy if omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct CheckReport {
    distance: f64,
    cost: f64,
    commands: Vec<Command>,
    resources: ResourceState,
}

impl Check {
    /// Fails with exit code 1 when the player cannot pay.
    pub fn execute(self) -> Result<ExitCode> {
        let catalog = load_catalog(self.config.as_deref())?;
        let player = PlayerSnapshot::from_json(&read_to_string(&self.player)?)
            .with_context(|| format!("Failed to parse player data: {}", self.player.display()))?;

        let dimension = self
            .dimension
            .unwrap_or_else(|| player.position.dimension.clone());
        let destination = Position::new(self.to, dimension);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let strategy = catalog.strategy(&self.route);
        match strategy.charge_with_rng(player.position, destination, &player.resources, &mut rng) {
            Ok(charge) => {
                let report = CheckReport {
                    distance: charge.quote.distance,
                    cost: charge.quote.cost,
                    commands: charge.commands,
                    resources: charge.resources,
                };
                print_report(&report, self.format)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(err @ ConsumptionError::Insufficient(_)) => {
                println!("{} {}", style(err.error_code()).bold().red(), err);
                Ok(ExitCode::FAILURE)
            }
            Err(err) => Err(err).context("Failed to charge player"),
        }
    }
}

fn print_report(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => {
            println!(
                "{} distance {}, cost {}",
                style("Quote:").bold().cyan(),
                report.distance,
                report.cost
            );
            println!("{}", style("Commands:").bold().cyan());
            if report.commands.is_empty() {
                println!("  (none)");
            }
            for command in &report.commands {
                println!("  {command}");
            }
            println!("{}", style("Remaining:").bold().cyan());
            println!("  Experience: {} points", report.resources.experience.points);
            println!("  Hunger:     {:.2}", report.resources.hunger.total());
            println!("  Health:     {}", report.resources.health);
            println!("  Item stacks: {}", report.resources.items.len());
        }
    }
    Ok(())
}
