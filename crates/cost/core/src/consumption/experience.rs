use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Outcome, Policy, default_rate, rate};
use crate::command;
use crate::config::StageConfig;
use crate::error::{ConfigError, ConsumptionError, InsufficientResources, Stage};
use crate::limits::finite;
use crate::resource::{Experience, ResourceState};

/// Unit an experience price is charged in.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExperienceMode {
    /// Raw points, rounded up.
    Points,
    /// Fractional levels on the level curve.
    Level,
}

/// Configured experience strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExperienceStrategy {
    #[default]
    Points,
    Level,
    /// Draw [`ExperienceMode`] per call from [`Probability`].
    Random,
}

/// Relative weights of the two modes under [`ExperienceStrategy::Random`].
///
/// Weights are normalised at build time. A non-positive total falls back to an
/// even split.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probability {
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub level: f64,
}

impl Default for Probability {
    fn default() -> Self {
        Self::EVEN
    }
}

impl Probability {
    pub const EVEN: Self = Self {
        points: 0.5,
        level: 0.5,
    };

    fn normalized(self) -> Result<Self, ConfigError> {
        let points = finite(Stage::Consumption, "probability.points", self.points)?.max(0.0);
        let level = finite(Stage::Consumption, "probability.level", self.level)?.max(0.0);
        let total = points + level;
        if total <= 0.0 {
            return Ok(Self::EVEN);
        }
        Ok(Self {
            points: points / total,
            level: level / total,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExperienceParams {
    rate: f64,
    strategy: ExperienceStrategy,
    probability: Probability,
}

impl Default for ExperienceParams {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            strategy: ExperienceStrategy::Points,
            probability: Probability::EVEN,
        }
    }
}

/// Charges the price in experience.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperienceCost {
    pub(crate) policy: Policy,
    rate: f64,
    strategy: ExperienceStrategy,
    probability: Probability,
}

impl ExperienceCost {
    pub fn new(policy: Policy, rate: f64, strategy: ExperienceStrategy) -> Self {
        Self {
            policy,
            rate,
            strategy,
            probability: Probability::EVEN,
        }
    }

    pub(crate) fn from_config(config: &StageConfig) -> Result<Self, ConfigError> {
        let policy: Policy = config.params(Stage::Consumption)?;
        let params: ExperienceParams = config.params(Stage::Consumption)?;
        Ok(Self {
            policy,
            rate: rate(params.rate)?,
            strategy: params.strategy,
            probability: params.probability.normalized()?,
        })
    }

    pub fn probability(&self) -> Probability {
        self.probability
    }

    pub fn strategy(&self) -> ExperienceStrategy {
        self.strategy
    }

    fn select_mode<R: Rng + ?Sized>(&self, rng: &mut R) -> ExperienceMode {
        match self.strategy {
            ExperienceStrategy::Points => ExperienceMode::Points,
            ExperienceStrategy::Level => ExperienceMode::Level,
            ExperienceStrategy::Random => {
                if rng.r#gen::<f64>() < self.probability.points {
                    ExperienceMode::Points
                } else {
                    ExperienceMode::Level
                }
            }
        }
    }

    pub(crate) fn apply<R: Rng + ?Sized>(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
        rng: &mut R,
    ) -> Result<Outcome, ConsumptionError> {
        let mode = self.select_mode(rng);
        let current = resources.experience;

        let (paid, taken) = match mode {
            ExperienceMode::Points => {
                let required = (cost_value * self.rate).ceil();
                let available = current.points as f64;
                if self.policy.is_strict() && available < required {
                    let shortfall = InsufficientResources::experience(available, required, mode);
                    return Err(shortfall.into());
                }
                let paid = required.min(available).max(0.0) as i64;
                (paid as f64, Experience::new(paid))
            }
            ExperienceMode::Level => {
                let required = cost_value * self.rate;
                let available = current.level_progress();
                if self.policy.is_strict() && available < required {
                    let shortfall = InsufficientResources::experience(available, required, mode);
                    return Err(shortfall.into());
                }
                let paid = required.min(available).max(0.0);
                let left = Experience::points_at_level(available - paid);
                (paid, (current - left).max(Experience::ZERO))
            }
        };

        resources.experience -= taken;
        tracing::debug!(%mode, paid, points = taken.points, "charged experience");

        let commands = if taken.points > 0 {
            vec![command::take_experience(taken.points)]
        } else {
            Vec::new()
        };
        Ok(Outcome::new(
            self.policy.remaining(cost_value, paid, self.rate),
            commands,
        ))
    }
}
