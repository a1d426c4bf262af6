use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use super::{Outcome, Policy, default_rate, rate, to_decimal};
use crate::command;
use crate::config::StageConfig;
use crate::error::{ConfigError, ConsumptionError, InsufficientResources, Stage};
use crate::resource::{ResourceKind, ResourceState};

/// Hunger points drained per second by each level of the hunger effect.
pub const HUNGER_PER_SECOND_PER_LEVEL: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// Highest effect level the game accepts (amplifier 255).
const MAX_EFFECT_LEVEL: u32 = 256;

/// Hunger effect that drains a given amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HungerEffect {
    /// Seconds.
    pub duration: u64,
    /// One-based effect level; the command amplifier is `level - 1`.
    pub level: u32,
}

impl HungerEffect {
    /// Finds the effect whose drain overshoots `drain` the least.
    ///
    /// Levels are tried from 256 down to 1 with `duration = ceil(drain / 0.025 / level)`.
    /// On equal overshoot the higher level wins; an exact match stops the search.
    /// Returns `None` for a non-positive drain, or when no level gives a duration
    /// that fits in seconds.
    pub fn for_drain(drain: Decimal) -> Option<Self> {
        if drain <= Decimal::ZERO {
            return None;
        }

        let mut best: Option<(Decimal, Self)> = None;
        for level in (1..=MAX_EFFECT_LEVEL).rev() {
            let per_second = HUNGER_PER_SECOND_PER_LEVEL * Decimal::from(level);
            let Some(seconds) = drain.checked_div(per_second) else {
                continue;
            };
            let duration = seconds.ceil();
            let Some(overshoot) = duration
                .checked_mul(per_second)
                .and_then(|produced| produced.checked_sub(drain))
            else {
                continue;
            };
            let Some(duration) = duration.to_u64() else {
                continue;
            };

            if best.is_none_or(|(error, _)| overshoot < error) {
                best = Some((overshoot, Self { duration, level }));
            }
            if overshoot.is_zero() {
                break;
            }
        }
        best.map(|(_, effect)| effect)
    }

    pub fn amplifier(&self) -> u32 {
        self.level - 1
    }
}

#[derive(Debug, Deserialize)]
struct HungerParams {
    #[serde(default = "default_rate")]
    rate: f64,
}

/// Charges the price in hunger.
///
/// The pool is lowered directly and a matching hunger effect is emitted so the
/// game applies the same drain.
#[derive(Clone, Debug, PartialEq)]
pub struct HungerEffectCost {
    pub(crate) policy: Policy,
    rate: f64,
}

impl HungerEffectCost {
    pub fn new(policy: Policy, rate: f64) -> Self {
        Self { policy, rate }
    }

    pub(crate) fn from_config(config: &StageConfig) -> Result<Self, ConfigError> {
        let policy: Policy = config.params(Stage::Consumption)?;
        let params: HungerParams = config.params(Stage::Consumption)?;
        Ok(Self::new(policy, rate(params.rate)?))
    }

    pub(crate) fn apply(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
    ) -> Result<Outcome, ConsumptionError> {
        let delta = cost_value * self.rate;
        let total = resources.hunger.total();
        if self.policy.is_strict() && total < delta {
            return Err(InsufficientResources::new(ResourceKind::Hunger, total, delta).into());
        }

        let paid = delta.min(total).max(0.0);
        let mut commands = Vec::new();
        if paid > 0.0 {
            let effect = HungerEffect::for_drain(to_decimal("hunger drain", paid)?).ok_or(
                ConsumptionError::Unrepresentable {
                    what: "hunger effect duration",
                    value: paid,
                },
            )?;
            tracing::debug!(paid, duration = effect.duration, level = effect.level, "charged hunger");
            resources.hunger.set_total(total - paid);
            commands.push(command::hunger_effect(effect.duration, effect.amplifier()));
        }

        Ok(Outcome::new(
            self.policy.remaining(cost_value, paid, self.rate),
            commands,
        ))
    }
}
