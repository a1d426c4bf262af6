//! Configuration document loader.

use std::path::Path;

use cost_core::StrategyConfig;
use serde::de::DeserializeOwned;

use crate::document::{DEFAULT_DOCUMENT, TeleportConfig};
use crate::loaders::{LoadResult, read_file};

/// Loader for teleport documents and standalone strategies.
///
/// The format follows the file extension: `.json` is read as JSON, anything
/// else as TOML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the full plugin document.
    pub fn load(path: &Path) -> LoadResult<TeleportConfig> {
        parse(path)
    }

    /// Load the plugin document, or the built-in default if `path` does not exist.
    pub fn load_or_default(path: &Path) -> LoadResult<TeleportConfig> {
        if path.exists() {
            return Self::load(path);
        }
        tracing::info!(path = %path.display(), "config not found, using built-in defaults");
        Self::builtin()
    }

    /// The built-in default document.
    pub fn builtin() -> LoadResult<TeleportConfig> {
        toml::from_str(DEFAULT_DOCUMENT)
            .map_err(|e| anyhow::anyhow!("Failed to parse built-in config: {}", e))
    }

    /// Load a bare strategy document (`distance`, `cost`, `consumption`).
    pub fn load_strategy(path: &Path) -> LoadResult<StrategyConfig> {
        parse(path)
    }
}

fn parse<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let content = read_file(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config JSON {}: {}", path.display(), e))
    } else {
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }
}
