//! Data-driven teleport configuration.
//!
//! This crate owns the plugin document and turns it into ready strategies:
//! - Global spawn point and default cost strategy
//! - Per-route switches and strategy overrides
//! - A built-in default document (food-priced items behind a hunger drain)
//!
//! Documents are TOML or JSON. Every strategy in a document is built when the
//! document is loaded, so a bad tag surfaces at startup.

pub mod document;
pub mod loaders;

pub use document::{DEFAULT_DOCUMENT, GlobalConfig, RouteConfig, TeleportConfig, routes};
pub use loaders::{ConfigLoader, LoadResult, StrategyCatalog};
