//! Cost stage: distance to price.

use serde::Deserialize;

use crate::config::{Registry, StageConfig};
use crate::error::{ConfigError, Stage};
use crate::limits::{Limits, finite};

/// Pricing curve.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Curve {
    /// `base + distance * scale`
    Linear { base: f64 },
    /// `base ^ distance * scale`
    Exponential { base: f64 },
}

/// Built cost stage. Output is always clamped into `[min_cost, max_cost]`.
#[derive(Clone, Debug, PartialEq)]
pub struct CostCalculator {
    curve: Curve,
    limits: Limits,
    scale: f64,
}

impl CostCalculator {
    pub const DEFAULT_LINEAR_BASE: f64 = 1.0;
    pub const DEFAULT_EXPONENTIAL_BASE: f64 = 1.0025;

    pub fn new(curve: Curve) -> Self {
        Self {
            curve,
            limits: Limits::UNBOUNDED,
            scale: 1.0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn compute(&self, distance: f64) -> f64 {
        let value = match self.curve {
            Curve::Linear { base } => base + distance * self.scale,
            Curve::Exponential { base } => base.powf(distance) * self.scale,
        };
        self.limits.clamp(value)
    }
}

#[derive(Debug, Deserialize)]
struct CostParams {
    #[serde(default = "neg_infinity")]
    min_cost: f64,
    #[serde(default = "infinity")]
    max_cost: f64,
    #[serde(default = "one")]
    scale: f64,
    base: Option<f64>,
}

fn neg_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn infinity() -> f64 {
    f64::INFINITY
}

fn one() -> f64 {
    1.0
}

fn build(
    config: &StageConfig,
    curve: fn(Option<f64>) -> Curve,
) -> Result<CostCalculator, ConfigError> {
    let stage = Stage::Cost;
    let params: CostParams = config.params(stage)?;
    let curve = curve(params.base);
    let (Curve::Linear { base } | Curve::Exponential { base }) = curve;
    finite(stage, "base", base)?;
    Ok(CostCalculator {
        curve,
        limits: Limits::new(stage, params.min_cost, params.max_cost)?,
        scale: finite(stage, "scale", params.scale)?,
    })
}

fn linear(config: &StageConfig) -> Result<CostCalculator, ConfigError> {
    build(config, |base| Curve::Linear {
        base: base.unwrap_or(CostCalculator::DEFAULT_LINEAR_BASE),
    })
}

fn exponential(config: &StageConfig) -> Result<CostCalculator, ConfigError> {
    build(config, |base| Curve::Exponential {
        base: base.unwrap_or(CostCalculator::DEFAULT_EXPONENTIAL_BASE),
    })
}

/// `type` tags of the cost stage.
pub(crate) const COST_TYPES: Registry<CostCalculator> =
    &[("linear", linear), ("exponential", exponential)];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve;

    fn build_stage(config: StageConfig) -> CostCalculator {
        resolve(Stage::Cost, &config, COST_TYPES).unwrap()
    }

    #[test]
    fn linear_defaults_to_unit_base() {
        let calc = build_stage(StageConfig::new("linear"));
        assert_eq!(calc.curve(), Curve::Linear { base: 1.0 });
        assert_eq!(calc.compute(10.0), 11.0);

        let calc = build_stage(StageConfig::new("linear").with("base", 0).with("scale", 1));
        assert_eq!(calc.compute(50.0), 50.0);
    }

    #[test]
    fn exponential_scales_after_power() {
        let calc = build_stage(
            StageConfig::new("exponential")
                .with("base", 2.0)
                .with("scale", 0.5),
        );
        assert_eq!(calc.compute(4.0), 8.0);
        assert_eq!(
            build_stage(StageConfig::new("exponential")).curve(),
            Curve::Exponential { base: 1.0025 }
        );
    }

    #[test]
    fn results_stay_within_bounds_for_any_distance() {
        for tag in ["linear", "exponential"] {
            let calc = build_stage(
                StageConfig::new(tag)
                    .with("base", 3.0)
                    .with("min_cost", 2.0)
                    .with("max_cost", 30.0),
            );
            for distance in [-1e6, -3.0, 0.0, 0.5, 2.0, 100.0, 1e9] {
                let cost = calc.compute(distance);
                assert!((2.0..=30.0).contains(&cost), "{tag} gave {cost} at {distance}");
            }
        }
    }

    #[test]
    fn malformed_base_is_rejected() {
        let config = StageConfig::new("exponential").with("base", "fast");
        assert!(matches!(
            resolve(Stage::Cost, &config, COST_TYPES),
            Err(ConfigError::InvalidParameters { .. })
        ));
    }
}
