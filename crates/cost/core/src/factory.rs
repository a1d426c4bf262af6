//! Strategy factory: configuration to a ready-to-run pipeline.
//!
//! ```text
//! StrategyConfig ──build──▶ CostStrategy
//!                              │
//!   (start, end) ─▶ distance ─▶ cost ─▶ consumption(clone of resources) ─▶ commands
//! ```
//!
//! Every `type` tag is resolved once in [`CostStrategy::build`]; an unknown tag
//! anywhere in the tree fails the build instead of a later call.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;
use crate::config::{StrategyConfig, resolve};
use crate::consumption::{CONSUMPTION_TYPES, Consumption};
use crate::cost::{COST_TYPES, CostCalculator};
use crate::distance::{DISTANCE_TYPES, DistanceCalculator};
use crate::error::{ConfigError, ConsumptionError, Stage};
use crate::resource::{Position, ResourceState};

/// Price of a move, before anything is paid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quote {
    pub distance: f64,
    pub cost: f64,
}

/// Full result of charging a move.
#[derive(Clone, Debug, PartialEq)]
pub struct Charge {
    pub quote: Quote,
    /// Value left over by the consumption tree, see `PassStrategy`.
    pub remaining: f64,
    pub commands: Vec<Command>,
    /// The private copy of the resources after every deduction.
    pub resources: ResourceState,
}

/// Built three-stage pipeline.
///
/// Immutable once built and safe to share across threads; every call works on
/// its own copy of the caller's resources.
#[derive(Clone, Debug, PartialEq)]
pub struct CostStrategy {
    distance: DistanceCalculator,
    cost: CostCalculator,
    consumption: Consumption,
}

impl CostStrategy {
    pub fn new(
        distance: DistanceCalculator,
        cost: CostCalculator,
        consumption: Consumption,
    ) -> Self {
        Self {
            distance,
            cost,
            consumption,
        }
    }

    /// Resolves every stage of `config` against the built-in type tables.
    ///
    /// Missing stages use `euclidean`, `linear` and `items`.
    pub fn build(config: &StrategyConfig) -> Result<Self, ConfigError> {
        let distance = resolve(Stage::Distance, &config.distance_or_default(), DISTANCE_TYPES)?;
        let cost = resolve(Stage::Cost, &config.cost_or_default(), COST_TYPES)?;
        let consumption = resolve(
            Stage::Consumption,
            &config.consumption_or_default(),
            CONSUMPTION_TYPES,
        )?;
        tracing::debug!(
            metric = %distance.metric(),
            curve = %cost.curve(),
            "built cost strategy"
        );
        Ok(Self::new(distance, cost, consumption))
    }

    pub fn distance(&self) -> &DistanceCalculator {
        &self.distance
    }

    pub fn cost(&self) -> &CostCalculator {
        &self.cost
    }

    pub fn consumption(&self) -> &Consumption {
        &self.consumption
    }

    /// Prices a move without touching any resources.
    pub fn quote(&self, start: impl Into<Position>, end: impl Into<Position>) -> Quote {
        let (start, end) = (start.into(), end.into());
        let distance = self.distance.calculate(&start, &end);
        let cost = self.cost.compute(distance);
        Quote { distance, cost }
    }

    /// Commands that charge `resources` for the move, using an entropy-seeded RNG.
    pub fn evaluate(
        &self,
        start: impl Into<Position>,
        end: impl Into<Position>,
        resources: &ResourceState,
    ) -> Result<Vec<Command>, ConsumptionError> {
        self.evaluate_with_rng(start, end, resources, &mut StdRng::from_entropy())
    }

    /// Like [`evaluate`](Self::evaluate) with a caller-supplied random source.
    pub fn evaluate_with_rng<R: Rng + ?Sized>(
        &self,
        start: impl Into<Position>,
        end: impl Into<Position>,
        resources: &ResourceState,
        rng: &mut R,
    ) -> Result<Vec<Command>, ConsumptionError> {
        self.charge_with_rng(start, end, resources, rng)
            .map(|charge| charge.commands)
    }

    /// Runs the whole pipeline and returns the mutated copy alongside the commands.
    pub fn charge_with_rng<R: Rng + ?Sized>(
        &self,
        start: impl Into<Position>,
        end: impl Into<Position>,
        resources: &ResourceState,
        rng: &mut R,
    ) -> Result<Charge, ConsumptionError> {
        let quote = self.quote(start, end);
        let mut resources = resources.clone();
        let outcome = self.consumption.apply_cost(quote.cost, &mut resources, rng)?;
        tracing::trace!(
            distance = quote.distance,
            cost = quote.cost,
            commands = outcome.commands.len(),
            "charged move"
        );
        Ok(Charge {
            quote,
            remaining: outcome.remaining,
            commands: outcome.commands,
            resources,
        })
    }
}
