use serde::Deserialize;

use super::{Outcome, Policy, default_rate, rate};
use crate::command;
use crate::config::StageConfig;
use crate::error::{ConfigError, ConsumptionError, InsufficientResources, Stage};
use crate::resource::{ResourceKind, ResourceState};

pub const DEFAULT_DAMAGE_TYPE: &str = "minecraft:generic";

#[derive(Debug, Deserialize)]
struct HealthParams {
    #[serde(default = "default_rate")]
    rate: f64,
    #[serde(default = "default_damage_type")]
    damage_type: String,
}

fn default_damage_type() -> String {
    DEFAULT_DAMAGE_TYPE.to_string()
}

/// Charges the price in health through a damage command.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthCost {
    pub(crate) policy: Policy,
    rate: f64,
    damage_type: String,
}

impl HealthCost {
    pub fn new(policy: Policy, rate: f64, damage_type: impl Into<String>) -> Self {
        Self {
            policy,
            rate,
            damage_type: damage_type.into(),
        }
    }

    pub(crate) fn from_config(config: &StageConfig) -> Result<Self, ConfigError> {
        let policy: Policy = config.params(Stage::Consumption)?;
        let params: HealthParams = config.params(Stage::Consumption)?;
        Ok(Self::new(policy, rate(params.rate)?, params.damage_type))
    }

    pub fn damage_type(&self) -> &str {
        &self.damage_type
    }

    pub(crate) fn apply(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
    ) -> Result<Outcome, ConsumptionError> {
        let delta = cost_value * self.rate;
        let health = resources.health;
        if self.policy.is_strict() && health < delta {
            return Err(InsufficientResources::new(ResourceKind::Health, health, delta).into());
        }

        let paid = delta.min(health).max(0.0);
        resources.health -= paid;

        let mut commands = Vec::new();
        if paid > 0.0 {
            tracing::debug!(paid, damage_type = %self.damage_type, "charged health");
            commands.push(command::damage(paid, &self.damage_type));
        }
        Ok(Outcome::new(
            self.policy.remaining(cost_value, paid, self.rate),
            commands,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumption::{CheckStrategy, Consumption, PassStrategy};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn damage_type_defaults_to_generic() {
        let Consumption::Health(cost) = Consumption::build(&StageConfig::new("health")).unwrap()
        else {
            panic!("expected health node");
        };
        assert_eq!(cost.damage_type(), DEFAULT_DAMAGE_TYPE);
    }

    #[test]
    fn deducts_scaled_health() {
        let node = Consumption::build(
            &StageConfig::new("health")
                .with("rate", 0.5)
                .with("damage_type", "minecraft:magic"),
        )
        .unwrap();
        let mut resources = ResourceState::default().with_health(20.0);
        let mut rng = StdRng::seed_from_u64(0);

        let outcome = node.apply_cost(9.0, &mut resources, &mut rng).unwrap();
        assert_eq!(resources.health, 15.5);
        assert_eq!(outcome.commands, ["damage @s 4.5 minecraft:magic"]);
    }

    #[test]
    fn strict_requires_enough_health() {
        let cost = HealthCost::new(Policy::default(), 1.0, DEFAULT_DAMAGE_TYPE);
        let mut resources = ResourceState::default().with_health(3.0);
        let err = cost.apply(5.0, &mut resources).unwrap_err();
        assert_eq!(err.as_insufficient().unwrap().resource, ResourceKind::Health);
        assert_eq!(resources.health, 3.0);
    }

    #[test]
    fn lenient_propagate_takes_remaining_health() {
        let cost = HealthCost::new(
            Policy::new(PassStrategy::Propagate, CheckStrategy::Lenient),
            2.0,
            DEFAULT_DAMAGE_TYPE,
        );
        let mut resources = ResourceState::default().with_health(3.0);
        let outcome = cost.apply(5.0, &mut resources).unwrap();
        assert_eq!(resources.health, 0.0);
        assert_eq!(outcome.commands, ["damage @s 3 minecraft:generic"]);
        // 3 health at rate 2 covers 1.5 cost units.
        assert_eq!(outcome.remaining, 3.5);
    }
}
