//! Runtime wiring for priced teleports.
//!
//! This crate connects a [`StrategyCatalog`](cost_content::StrategyCatalog) to
//! the outside world through three small collaborator traits, so the same
//! service runs against a live server, recorded player data, or test fixtures.
//!
//! Modules are organized by responsibility:
//! - [`api`] holds the collaborator traits and error types
//! - [`snapshot`] parses raw player data into resource and position values
//! - [`memory`] provides in-memory collaborators for tools and tests
//! - [`service`] runs a teleport end to end
pub mod api;
pub mod memory;
pub mod service;
pub mod snapshot;

pub use api::{
    CommandExecutor, ExecutorError, PositionProvider, ResourceProvider, Result, RuntimeError,
};
pub use memory::{InMemoryPlayers, RecordingExecutor};
pub use service::{TeleportService, TeleportServiceBuilder};
pub use snapshot::PlayerSnapshot;
