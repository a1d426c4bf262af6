//! In-memory collaborators for tools, tests and local runs.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use cost_core::{Command, Position, ResourceState};

use crate::api::{CommandExecutor, ExecutorError, PositionProvider, ResourceProvider};
use crate::snapshot::PlayerSnapshot;

/// Player snapshots keyed by name; serves both resources and positions.
pub struct InMemoryPlayers {
    players: RwLock<HashMap<String, PlayerSnapshot>>,
}

impl InMemoryPlayers {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    /// Builds the store from a JSON object mapping player names to player data.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let documents: HashMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let players = documents
            .into_iter()
            .map(|(name, data)| Ok((name, PlayerSnapshot::from_value(data)?)))
            .collect::<serde_json::Result<HashMap<_, _>>>()?;
        Ok(Self {
            players: RwLock::new(players),
        })
    }

    /// Adds or replaces a player. Ignored if the store's lock is poisoned.
    pub fn insert(&self, name: impl Into<String>, snapshot: PlayerSnapshot) {
        if let Ok(mut players) = self.players.write() {
            players.insert(name.into(), snapshot);
        }
    }

    pub fn snapshot(&self, name: &str) -> Option<PlayerSnapshot> {
        self.players.read().ok()?.get(name).cloned()
    }
}

impl Default for InMemoryPlayers {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceProvider for InMemoryPlayers {
    fn resource_state(&self, player: &str) -> Option<ResourceState> {
        self.snapshot(player).map(|snapshot| snapshot.resources)
    }
}

impl PositionProvider for InMemoryPlayers {
    fn position(&self, player: &str) -> Option<Position> {
        self.snapshot(player).map(|snapshot| snapshot.position)
    }
}

/// Executor that keeps every command instead of running it.
#[derive(Default)]
pub struct RecordingExecutor {
    commands: Mutex<Vec<Command>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything executed so far, in order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, commands: &[Command]) -> Result<(), ExecutorError> {
        self.commands
            .lock()
            .map_err(|_| ExecutorError::LockPoisoned)?
            .extend_from_slice(commands);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_load_from_json_object() {
        let players = InMemoryPlayers::from_json(
            r#"{
                "Alex": { "XpTotal": 7, "Pos": [1, 2, 3] },
                "Steve": { "Pos": [0, 64, 0], "Dimension": "minecraft:the_end" }
            }"#,
        )
        .unwrap();

        assert_eq!(players.resource_state("Alex").unwrap().experience.points, 7);
        assert_eq!(players.position("Steve").unwrap().dimension, "minecraft:the_end");
        assert!(players.position("Herobrine").is_none());
    }

    #[test]
    fn recorder_keeps_order() {
        let executor = RecordingExecutor::new();
        executor.execute(&["a".to_string(), "b".to_string()]).unwrap();
        executor.execute(&["c".to_string()]).unwrap();
        assert_eq!(executor.commands(), ["a", "b", "c"]);
    }
}
