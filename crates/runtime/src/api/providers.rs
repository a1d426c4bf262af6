//! Collaborator contracts between the teleport service and the game world.
//!
//! The service never talks to a server directly. Hosts plug in these traits so
//! the same flow runs against live data, recorded snapshots, or fixtures.
use cost_core::{Command, Position, ResourceState};

use super::errors::ExecutorError;

/// Source of a player's current consumable resources.
pub trait ResourceProvider: Send + Sync {
    /// Snapshot of `player`'s resources, or `None` if the player is unknown.
    fn resource_state(&self, player: &str) -> Option<ResourceState>;
}

/// Source of a player's current position.
pub trait PositionProvider: Send + Sync {
    fn position(&self, player: &str) -> Option<Position>;
}

/// Sink for server commands.
pub trait CommandExecutor: Send + Sync {
    /// Runs `commands` in order; stops at the first rejected one.
    fn execute(&self, commands: &[Command]) -> Result<(), ExecutorError>;
}
