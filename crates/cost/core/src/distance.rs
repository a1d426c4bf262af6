//! Distance stage: two positions to one scalar.
//!
//! Every metric shares the same post-processing:
//! `clamp(raw * scale + surcharge, min_distance, max_distance)`, where the
//! surcharge is non-zero only for cross-dimension moves under
//! [`CrossDimension::Add`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{Registry, StageConfig};
use crate::error::{ConfigError, Stage};
use crate::limits::{Limits, finite};
use crate::resource::{Position, Vec3};

/// Surcharge charged per endpoint when a dimension has no table entry.
pub const DEFAULT_CROSS_DIMENSIONAL_COST: f64 = 35.0;

/// Coordinate-space metric.
#[derive(Clone, Copy, Debug, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    Euclidean,
    Manhattan,
    Chebyshev,
    /// Ignores coordinates entirely.
    Fixed(f64),
}

impl Metric {
    pub fn measure(&self, from: &Vec3, to: &Vec3) -> f64 {
        let [dx, dy, dz] = from.abs_diff(to);
        match self {
            Self::Euclidean => (dx * dx + dy * dy + dz * dz).sqrt(),
            Self::Manhattan => dx + dy + dz,
            Self::Chebyshev => dx.max(dy).max(dz),
            Self::Fixed(distance) => *distance,
        }
    }
}

/// What to do with the cross-dimension surcharge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CrossDimension {
    /// Fold the surcharge into the distance before clamping.
    #[default]
    Add,
    /// Leave the distance alone; the surcharge is only reported.
    Ignore,
}

/// Parameters shared by every distance type.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
struct DistanceParams {
    min_distance: f64,
    max_distance: f64,
    scale: f64,
    /// `fixed` only.
    distance: f64,
    cross_dimension: CrossDimension,
    cross_dimensional_cost: BTreeMap<String, f64>,
    default_cross_dimensional_cost: f64,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            min_distance: f64::NEG_INFINITY,
            max_distance: f64::INFINITY,
            scale: 1.0,
            distance: 0.0,
            cross_dimension: CrossDimension::Add,
            cross_dimensional_cost: BTreeMap::new(),
            default_cross_dimensional_cost: DEFAULT_CROSS_DIMENSIONAL_COST,
        }
    }
}

/// Built distance stage.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceCalculator {
    metric: Metric,
    limits: Limits,
    scale: f64,
    cross_dimension: CrossDimension,
    dimension_costs: BTreeMap<String, f64>,
    default_dimension_cost: f64,
}

impl DistanceCalculator {
    /// Unbounded, unscaled calculator with the default surcharge table.
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            limits: Limits::UNBOUNDED,
            scale: 1.0,
            cross_dimension: CrossDimension::Add,
            dimension_costs: BTreeMap::new(),
            default_dimension_cost: DEFAULT_CROSS_DIMENSIONAL_COST,
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

    pub fn with_cross_dimension(mut self, cross_dimension: CrossDimension) -> Self {
        self.cross_dimension = cross_dimension;
        self
    }

    pub fn with_dimension_cost(mut self, dimension: impl Into<String>, cost: f64) -> Self {
        self.dimension_costs.insert(dimension.into(), cost);
        self
    }

    fn from_params(metric: Metric, params: DistanceParams) -> Result<Self, ConfigError> {
        let stage = Stage::Distance;
        let limits = Limits::new(stage, params.min_distance, params.max_distance)?;
        let scale = finite(stage, "scale", params.scale)?;
        let default_dimension_cost = finite(
            stage,
            "default_cross_dimensional_cost",
            params.default_cross_dimensional_cost,
        )?;
        for cost in params.cross_dimensional_cost.values() {
            finite(stage, "cross_dimensional_cost", *cost)?;
        }
        Ok(Self {
            metric,
            limits,
            scale,
            cross_dimension: params.cross_dimension,
            dimension_costs: params.cross_dimensional_cost,
            default_dimension_cost,
        })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn cross_dimension(&self) -> CrossDimension {
        self.cross_dimension
    }

    /// Clamped, scaled distance between two positions.
    pub fn calculate(&self, from: &Position, to: &Position) -> f64 {
        let raw = self.metric.measure(&from.coordinate, &to.coordinate);
        let surcharge = match self.cross_dimension {
            CrossDimension::Add => self.surcharge(from, to),
            CrossDimension::Ignore => 0.0,
        };
        self.limits.clamp(raw * self.scale + surcharge)
    }

    /// Sum of both endpoints' dimension costs, or zero within one dimension.
    pub fn surcharge(&self, from: &Position, to: &Position) -> f64 {
        if from.same_dimension(to) {
            return 0.0;
        }
        self.dimension_cost(&from.dimension) + self.dimension_cost(&to.dimension)
    }

    fn dimension_cost(&self, dimension: &str) -> f64 {
        self.dimension_costs
            .get(dimension)
            .copied()
            .unwrap_or(self.default_dimension_cost)
    }
}

fn build(
    config: &StageConfig,
    metric: impl FnOnce(&DistanceParams) -> Metric,
) -> Result<DistanceCalculator, ConfigError> {
    let params: DistanceParams = config.params(Stage::Distance)?;
    let metric = metric(&params);
    if let Metric::Fixed(distance) = metric {
        finite(Stage::Distance, "distance", distance)?;
    }
    DistanceCalculator::from_params(metric, params)
}

fn euclidean(config: &StageConfig) -> Result<DistanceCalculator, ConfigError> {
    build(config, |_| Metric::Euclidean)
}

fn manhattan(config: &StageConfig) -> Result<DistanceCalculator, ConfigError> {
    build(config, |_| Metric::Manhattan)
}

fn chebyshev(config: &StageConfig) -> Result<DistanceCalculator, ConfigError> {
    build(config, |_| Metric::Chebyshev)
}

fn fixed(config: &StageConfig) -> Result<DistanceCalculator, ConfigError> {
    build(config, |params| Metric::Fixed(params.distance))
}

/// `type` tags of the distance stage.
pub(crate) const DISTANCE_TYPES: Registry<DistanceCalculator> = &[
    ("euclidean", euclidean),
    ("manhattan", manhattan),
    ("chebyshev", chebyshev),
    ("fixed", fixed),
];
