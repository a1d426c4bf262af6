//! Teleport orchestration.
//!
//! One call prices the move with the route's strategy, runs the resulting cost
//! commands as the player, then runs the teleport itself:
//!
//! ```text
//! route check ─▶ providers (resources, positions) ─▶ strategy.charge
//!      ─▶ execute as <player> at @s run <cost command>...  ─▶ tp
//! ```
//!
//! Nothing is executed when pricing fails, so a shortfall never leaves a
//! half-charged player.

use std::sync::Arc;

use cost_content::{StrategyCatalog, routes};
use cost_core::{Command, Position, ResourceState};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::api::{CommandExecutor, PositionProvider, ResourceProvider, Result, RuntimeError};

/// Charges and performs teleports for a [`StrategyCatalog`].
pub struct TeleportService {
    catalog: StrategyCatalog,
    resources: Arc<dyn ResourceProvider>,
    positions: Arc<dyn PositionProvider>,
    executor: Arc<dyn CommandExecutor>,
}

impl TeleportService {
    pub fn builder() -> TeleportServiceBuilder {
        TeleportServiceBuilder::default()
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Teleports `player` to another online player.
    ///
    /// Returns every command that was executed, cost commands first.
    pub fn teleport_to_player(&self, player: &str, target: &str) -> Result<Vec<Command>> {
        self.ensure_enabled(routes::TO_PLAYER)?;
        if player == target {
            return Err(RuntimeError::SelfTeleport(player.to_string()));
        }

        let start = self.position_of(player)?;
        let end = self.position_of(target)?;
        let resources = self.resources_of(player)?;

        let teleport = format!("tp {player} {target}");
        self.charge_and_move(routes::TO_PLAYER, player, start, end, &resources, teleport)
    }

    /// Teleports `player` to a fixed destination priced by `route`.
    pub fn teleport_to_position(
        &self,
        player: &str,
        route: &str,
        destination: Position,
    ) -> Result<Vec<Command>> {
        self.ensure_enabled(route)?;
        let start = self.position_of(player)?;
        let resources = self.resources_of(player)?;

        let teleport = format!(
            "execute in {} run tp {player} {} {} {} {} {}",
            destination.dimension,
            destination.coordinate.x,
            destination.coordinate.y,
            destination.coordinate.z,
            destination.yaw,
            destination.pitch,
        );
        self.charge_and_move(route, player, start, destination, &resources, teleport)
    }

    /// Teleports `player` to the configured spawn point in the overworld.
    pub fn teleport_to_spawn(&self, player: &str) -> Result<Vec<Command>> {
        let spawn = Position::from(self.catalog.spawn_point());
        self.teleport_to_position(player, routes::TO_SPAWN, spawn)
    }

    fn charge_and_move(
        &self,
        route: &str,
        player: &str,
        start: Position,
        end: Position,
        resources: &ResourceState,
        teleport: Command,
    ) -> Result<Vec<Command>> {
        let strategy = self.catalog.strategy(route);
        let charge = strategy
            .charge_with_rng(start, end, resources, &mut StdRng::from_entropy())
            .inspect_err(|err| {
                tracing::warn!(player, route, error = %err, "teleport refused");
            })?;

        let mut commands: Vec<Command> = charge
            .commands
            .iter()
            .map(|command| format!("execute as {player} at @s run {command}"))
            .collect();
        commands.push(teleport);

        self.executor.execute(&commands)?;
        tracing::info!(
            player,
            route,
            distance = charge.quote.distance,
            cost = charge.quote.cost,
            charged = charge.commands.len(),
            "teleported"
        );
        Ok(commands)
    }

    fn ensure_enabled(&self, route: &str) -> Result<()> {
        if self.catalog.is_enabled(route) {
            Ok(())
        } else {
            Err(RuntimeError::RouteDisabled(route.to_string()))
        }
    }

    fn position_of(&self, player: &str) -> Result<Position> {
        self.positions
            .position(player)
            .ok_or_else(|| RuntimeError::PlayerNotFound(player.to_string()))
    }

    fn resources_of(&self, player: &str) -> Result<ResourceState> {
        self.resources
            .resource_state(player)
            .ok_or_else(|| RuntimeError::PlayerNotFound(player.to_string()))
    }
}

/// Builder for [`TeleportService`]; every collaborator is required.
#[derive(Default)]
pub struct TeleportServiceBuilder {
    catalog: Option<StrategyCatalog>,
    resources: Option<Arc<dyn ResourceProvider>>,
    positions: Option<Arc<dyn PositionProvider>>,
    executor: Option<Arc<dyn CommandExecutor>>,
}

impl TeleportServiceBuilder {
    pub fn catalog(mut self, catalog: StrategyCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn resources(mut self, provider: Arc<dyn ResourceProvider>) -> Self {
        self.resources = Some(provider);
        self
    }

    pub fn positions(mut self, provider: Arc<dyn PositionProvider>) -> Self {
        self.positions = Some(provider);
        self
    }

    /// Uses one value as both the resource and the position provider.
    pub fn players<P>(self, provider: Arc<P>) -> Self
    where
        P: ResourceProvider + PositionProvider + 'static,
    {
        self.resources(provider.clone()).positions(provider)
    }

    pub fn executor(mut self, executor: Arc<dyn CommandExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn build(self) -> Result<TeleportService> {
        Ok(TeleportService {
            catalog: self
                .catalog
                .ok_or(RuntimeError::MissingComponent("a strategy catalog"))?,
            resources: self
                .resources
                .ok_or(RuntimeError::MissingComponent("a resource provider"))?,
            positions: self
                .positions
                .ok_or(RuntimeError::MissingComponent("a position provider"))?,
            executor: self
                .executor
                .ok_or(RuntimeError::MissingComponent("a command executor"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::RecordingExecutor;

    #[test]
    fn build_requires_every_collaborator() {
        let err = TeleportService::builder()
            .catalog(StrategyCatalog::builtin().unwrap())
            .executor(Arc::new(RecordingExecutor::new()))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, RuntimeError::MissingComponent("a resource provider")));
    }
}
