//! Price a move without any player data.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::style;
use cost_content::routes;
use cost_core::{DEFAULT_DIMENSION, Position, Vec3};
use serde::Serialize;

use crate::utils::{OutputFormat, load_catalog, parse_vec3};

/// Price a move between two coordinates
#[derive(Parser)]
pub struct Quote {
    /// Start coordinate as `x,y,z`
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    from: Vec3,

    /// End coordinate as `x,y,z`
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    to: Vec3,

    /// Dimension of the start coordinate
    #[arg(long, default_value = DEFAULT_DIMENSION)]
    from_dimension: String,

    /// Dimension of the end coordinate
    #[arg(long, default_value = DEFAULT_DIMENSION)]
    to_dimension: String,

    /// Route whose strategy prices the move
    #[arg(short, long, default_value = routes::TO_PLAYER)]
    route: String,

    /// Teleport document (TOML or JSON); built-in defaults if omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct QuoteReport<'a> {
    route: &'a str,
    enabled: bool,
    distance: f64,
    cost: f64,
}

impl Quote {
    pub fn execute(self) -> Result<ExitCode> {
        let catalog = load_catalog(self.config.as_deref())?;
        let start = Position::new(self.from, self.from_dimension);
        let end = Position::new(self.to, self.to_dimension);
        let quote = catalog.strategy(&self.route).quote(start, end);

        let report = QuoteReport {
            route: &self.route,
            enabled: catalog.is_enabled(&self.route),
            distance: quote.distance,
            cost: quote.cost,
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!("{} {}", style("Route:").bold().cyan(), report.route);
                if !report.enabled {
                    println!("  {}", style("route is disabled").yellow());
                }
                println!("  Distance: {}", report.distance);
                println!("  Cost:     {}", report.cost);
            }
        }
        Ok(ExitCode::SUCCESS)
    }
}
