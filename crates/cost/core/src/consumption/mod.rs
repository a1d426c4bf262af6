//! Consumption stage: deducting a price from a player's resources.
//!
//! A consumption tree is built once from configuration and applied per request.
//! Leaves deduct a single resource kind; [`CompositeCost`] sequences children.
//!
//! # Contract
//!
//! [`Consumption::apply_cost`] mutates the [`ResourceState`] it is handed. The
//! pipeline passes a private clone, so only nested calls (composite children)
//! ever observe the mutation. A strict leaf checks before it mutates, so a
//! shortfall leaves that leaf's pools untouched.

mod composite;
mod experience;
mod health;
mod hunger;
mod items;

pub use composite::CompositeCost;
pub use experience::{ExperienceCost, ExperienceMode, ExperienceStrategy, Probability};
pub use health::{DEFAULT_DAMAGE_TYPE, HealthCost};
pub use hunger::{HUNGER_PER_SECOND_PER_LEVEL, HungerEffect, HungerEffectCost};
pub use items::{ItemOrder, ItemValueCost, Take, calculate_combination};

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::{Registry, StageConfig, resolve};
use crate::error::{ConfigError, ConsumptionError, Stage};
use crate::limits::finite;
use crate::resource::ResourceState;

/// Whether a node forwards the unpaid balance or the original price.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PassStrategy {
    /// Return the requested value unchanged.
    #[default]
    PassThrough,
    /// Return the value minus what was paid, floored at zero.
    Propagate,
}

/// Whether a shortfall fails the node or is absorbed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckStrategy {
    /// Raise an insufficiency before touching the pool.
    #[default]
    Strict,
    /// Pay what is available, possibly nothing.
    Lenient,
}

/// Pass and check strategy pair carried by every node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub pass_strategy: PassStrategy,
    pub check_strategy: CheckStrategy,
}

impl Policy {
    pub const fn new(pass_strategy: PassStrategy, check_strategy: CheckStrategy) -> Self {
        Self {
            pass_strategy,
            check_strategy,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.check_strategy == CheckStrategy::Strict
    }

    /// Value handed back to the parent after paying `paid` resource units.
    ///
    /// Under propagate the payment is converted back into cost units through
    /// `rate`. A non-positive rate never pays, so the value is returned as is.
    pub fn remaining(&self, cost_value: f64, paid: f64, rate: f64) -> f64 {
        match self.pass_strategy {
            PassStrategy::PassThrough => cost_value,
            PassStrategy::Propagate if rate > 0.0 => (cost_value - paid / rate).max(0.0),
            PassStrategy::Propagate => cost_value.max(0.0),
        }
    }
}

/// Result of applying one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    /// Value forwarded to the next stage, see [`PassStrategy`].
    pub remaining: f64,
    /// Commands realising the deduction, in order.
    pub commands: Vec<Command>,
}

impl Outcome {
    pub fn new(remaining: f64, commands: Vec<Command>) -> Self {
        Self {
            remaining,
            commands,
        }
    }
}

/// A built consumption node.
#[derive(Clone, Debug, PartialEq)]
pub enum Consumption {
    Experience(ExperienceCost),
    Items(ItemValueCost),
    Hunger(HungerEffectCost),
    Health(HealthCost),
    Composite(CompositeCost),
}

impl Consumption {
    /// Builds a node (and, for composites, its whole subtree) from configuration.
    pub fn build(config: &StageConfig) -> Result<Self, ConfigError> {
        resolve(Stage::Consumption, config, CONSUMPTION_TYPES)
    }

    pub fn policy(&self) -> Policy {
        match self {
            Self::Experience(cost) => cost.policy,
            Self::Items(cost) => cost.policy,
            Self::Hunger(cost) => cost.policy,
            Self::Health(cost) => cost.policy,
            Self::Composite(cost) => cost.policy,
        }
    }

    /// Deducts `cost_value` from `resources` in place.
    pub fn apply_cost<R: Rng + ?Sized>(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
        rng: &mut R,
    ) -> Result<Outcome, ConsumptionError> {
        if !cost_value.is_finite() {
            return Err(ConsumptionError::Unrepresentable {
                what: "cost value",
                value: cost_value,
            });
        }
        if cost_value <= 0.0 {
            tracing::trace!(cost_value, "non-positive cost, nothing to pay");
            let remaining = self.policy().remaining(cost_value, 0.0, 1.0);
            return Ok(Outcome::new(remaining, Vec::new()));
        }
        match self {
            Self::Experience(cost) => cost.apply(cost_value, resources, rng),
            Self::Items(cost) => cost.apply(cost_value, resources, rng),
            Self::Hunger(cost) => cost.apply(cost_value, resources),
            Self::Health(cost) => cost.apply(cost_value, resources),
            Self::Composite(cost) => cost.apply(cost_value, resources, rng),
        }
    }
}

/// Converts a float to an exact decimal through its shortest round-trip text.
pub(crate) fn to_decimal(what: &'static str, value: f64) -> Result<Decimal, ConsumptionError> {
    if value.is_finite() {
        if let Ok(decimal) = value.to_string().parse::<Decimal>() {
            return Ok(decimal);
        }
        if let Some(decimal) = Decimal::from_f64(value) {
            return Ok(decimal);
        }
    }
    Err(ConsumptionError::Unrepresentable { what, value })
}

/// Reads `rate`-style multipliers shared by every leaf.
pub(crate) fn rate(value: f64) -> Result<f64, ConfigError> {
    finite(Stage::Consumption, "rate", value)
}

fn default_rate() -> f64 {
    1.0
}

fn experience(config: &StageConfig) -> Result<Consumption, ConfigError> {
    ExperienceCost::from_config(config).map(Consumption::Experience)
}

fn items(config: &StageConfig) -> Result<Consumption, ConfigError> {
    ItemValueCost::from_config(config).map(Consumption::Items)
}

fn hunger(config: &StageConfig) -> Result<Consumption, ConfigError> {
    HungerEffectCost::from_config(config).map(Consumption::Hunger)
}

fn health(config: &StageConfig) -> Result<Consumption, ConfigError> {
    HealthCost::from_config(config).map(Consumption::Health)
}

fn composite(config: &StageConfig) -> Result<Consumption, ConfigError> {
    CompositeCost::from_config(config).map(Consumption::Composite)
}

/// `type` tags of the consumption stage.
pub(crate) const CONSUMPTION_TYPES: Registry<Consumption> = &[
    ("experience", experience),
    ("items", items),
    ("hunger", hunger),
    ("health", health),
    ("composite", composite),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Experience;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn policy_defaults_to_strict_pass_through() {
        let policy: Policy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, Policy::new(PassStrategy::PassThrough, CheckStrategy::Strict));
        assert!(policy.is_strict());
    }

    #[test]
    fn propagate_converts_payment_through_rate() {
        let propagate = Policy::new(PassStrategy::Propagate, CheckStrategy::Lenient);
        assert_eq!(propagate.remaining(10.0, 4.0, 1.0), 6.0);
        assert_eq!(propagate.remaining(10.0, 2.0, 0.5), 6.0);
        assert_eq!(propagate.remaining(10.0, 40.0, 1.0), 0.0);
        assert_eq!(propagate.remaining(10.0, 4.0, 0.0), 10.0);

        let through = Policy::default();
        assert_eq!(through.remaining(10.0, 4.0, 1.0), 10.0);
    }

    #[test]
    fn decimal_conversion_is_exact_for_short_floats() {
        assert_eq!(to_decimal("price", 0.1).unwrap().to_string(), "0.1");
        assert_eq!(to_decimal("price", 13.0).unwrap(), Decimal::from(13));
        assert!(to_decimal("price", f64::NAN).is_err());
    }

    #[test]
    fn zero_cost_pays_nothing() {
        let node = Consumption::build(&StageConfig::new("experience")).unwrap();
        let mut resources = ResourceState::default().with_experience(30);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = node.apply_cost(0.0, &mut resources, &mut rng).unwrap();
        assert!(outcome.commands.is_empty());
        assert_eq!(resources.experience, Experience::new(30));

        let outcome = node.apply_cost(-5.0, &mut resources, &mut rng).unwrap();
        assert!(outcome.commands.is_empty());
        assert_eq!(outcome.remaining, -5.0);
    }

    #[test]
    fn non_finite_cost_is_internal_error() {
        let node = Consumption::build(&StageConfig::new("health")).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let err = node
            .apply_cost(f64::NAN, &mut ResourceState::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ConsumptionError::Unrepresentable { .. }));
    }

    #[test]
    fn unknown_consumption_type_fails_build() {
        let err = Consumption::build(&StageConfig::new("mana")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownType { stage: Stage::Consumption, .. }));
    }
}
