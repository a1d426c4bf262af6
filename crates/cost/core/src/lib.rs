//! Pricing and charging of positional moves such as teleports.
//!
//! `cost-core` turns a move into a price (distance stage, then cost stage) and
//! deducts that price from a snapshot of the player's resources through a
//! configurable consumption tree, producing the commands that realise the
//! deduction in game. It is synchronous and never retains player state: build a
//! [`CostStrategy`] once from a [`StrategyConfig`] and call it per request.
pub mod command;
pub mod config;
pub mod consumption;
pub mod cost;
pub mod distance;
pub mod error;
pub mod factory;
pub mod limits;
pub mod resource;

pub use command::Command;
pub use config::{StageConfig, StrategyConfig};
pub use consumption::{
    CheckStrategy, CompositeCost, Consumption, ExperienceCost, ExperienceMode, ExperienceStrategy,
    HealthCost, HungerEffect, HungerEffectCost, ItemOrder, ItemValueCost, Outcome, PassStrategy,
    Policy, Probability,
};
pub use cost::{CostCalculator, Curve};
pub use distance::{CrossDimension, DistanceCalculator, Metric};
pub use error::{
    ConfigError, ConsumptionError, CostStrategyError, ErrorSeverity, InsufficientResources, Stage,
};
pub use factory::{Charge, CostStrategy, Quote};
pub use limits::Limits;
pub use resource::{
    DEFAULT_DIMENSION, DEFAULT_HEALTH, Experience, Hunger, Item, ItemError, LevelProgress,
    Position, ResourceKind, ResourceState, Vec3,
};
