use crate::error::{ConfigError, Stage};

/// Closed interval a stage clamps its output into.
///
/// Defaults to the whole real line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Limits {
    pub const UNBOUNDED: Self = Self {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    /// Validates a configured interval. Infinite ends are allowed, NaN is not.
    pub fn new(stage: Stage, min: f64, max: f64) -> Result<Self, ConfigError> {
        if min.is_nan() {
            return Err(ConfigError::NonFinite {
                stage,
                field: "min",
                value: min,
            });
        }
        if max.is_nan() {
            return Err(ConfigError::NonFinite {
                stage,
                field: "max",
                value: max,
            });
        }
        if min > max {
            return Err(ConfigError::InvalidBounds { stage, min, max });
        }
        Ok(Self { min, max })
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

/// Rejects NaN and infinite multipliers.
pub(crate) fn finite(stage: Stage, field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite {
            stage,
            field,
            value,
        })
    }
}
