//! Shared argument parsing and loading helpers.

use std::path::Path;

use anyhow::{Context, Result};
use cost_content::StrategyCatalog;
use cost_core::Vec3;

/// Output format
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Machine-readable JSON
    Json,
}

/// Parses `x,y,z` into a coordinate.
pub fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected `x,y,z`, got `{value}`"));
    };
    let parse = |axis: &str| {
        axis.parse::<f64>()
            .map_err(|e| format!("invalid coordinate `{axis}`: {e}"))
    };
    Ok(Vec3::new(parse(x)?, parse(y)?, parse(z)?))
}

/// Loads the catalog at `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&Path>) -> Result<StrategyCatalog> {
    match path {
        Some(path) => StrategyCatalog::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => StrategyCatalog::builtin(),
    }
}

pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
