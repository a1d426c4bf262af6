//! Plugin document types.

use std::collections::BTreeMap;

use cost_core::{StrategyConfig, Vec3};
use serde::{Deserialize, Serialize};

/// Built-in document used when no configuration file exists.
pub const DEFAULT_DOCUMENT: &str = include_str!("../data/default.toml");

/// Route names used by the runtime service.
pub mod routes {
    pub const TO_PLAYER: &str = "teleport-to-player";
    pub const TO_HOME: &str = "teleport-to-home";
    pub const TO_WAYPOINT: &str = "teleport-to-waypoint";
    pub const TO_SPAWN: &str = "teleport-to-spawn";
}

/// Whole plugin document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeleportConfig {
    pub global: GlobalConfig,
    #[serde(default)]
    pub routes: BTreeMap<String, RouteConfig>,
}

/// Settings shared by every route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub spawn_point: Vec3,
    #[serde(default)]
    pub cost_strategy: StrategyConfig,
}

/// One teleport route. Without its own strategy it uses the global one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_strategy: Option<StrategyConfig>,
}

fn enabled() -> bool {
    true
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cost_strategy: None,
        }
    }
}
