//! Declarative strategy documents.
//!
//! A strategy is three tagged stages. Each stage carries a `type` tag plus the
//! parameters of that type, kept as raw JSON until the stage is built so that
//! parameters are validated against the concrete type only.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Stage};

/// One pipeline stage: a `type` tag and its type-specific parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl StageConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Map::new(),
        }
    }

    /// Sets one parameter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Decodes the parameters into the typed structure of this stage's type.
    pub fn params<P: DeserializeOwned>(&self, stage: Stage) -> Result<P, ConfigError> {
        serde_json::from_value(Value::Object(self.params.clone())).map_err(|source| {
            ConfigError::InvalidParameters {
                stage,
                tag: self.kind.clone(),
                source,
            }
        })
    }
}

/// Full strategy document. Missing stages fall back to the defaults below.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<StageConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<StageConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<StageConfig>,
}

impl StrategyConfig {
    pub const DEFAULT_DISTANCE: &'static str = "euclidean";
    pub const DEFAULT_COST: &'static str = "linear";
    pub const DEFAULT_CONSUMPTION: &'static str = "items";

    pub fn with_distance(mut self, stage: StageConfig) -> Self {
        self.distance = Some(stage);
        self
    }

    pub fn with_cost(mut self, stage: StageConfig) -> Self {
        self.cost = Some(stage);
        self
    }

    pub fn with_consumption(mut self, stage: StageConfig) -> Self {
        self.consumption = Some(stage);
        self
    }

    pub fn distance_or_default(&self) -> StageConfig {
        self.distance
            .clone()
            .unwrap_or_else(|| StageConfig::new(Self::DEFAULT_DISTANCE))
    }

    pub fn cost_or_default(&self) -> StageConfig {
        self.cost
            .clone()
            .unwrap_or_else(|| StageConfig::new(Self::DEFAULT_COST))
    }

    pub fn consumption_or_default(&self) -> StageConfig {
        self.consumption
            .clone()
            .unwrap_or_else(|| StageConfig::new(Self::DEFAULT_CONSUMPTION))
    }
}

/// Builds a stage value from its raw configuration.
pub(crate) type Constructor<T> = fn(&StageConfig) -> Result<T, ConfigError>;

/// Static `type` tag table of one stage.
pub(crate) type Registry<T> = &'static [(&'static str, Constructor<T>)];

/// Looks the stage's tag up in `registry` and runs the matching constructor.
pub(crate) fn resolve<T>(
    stage: Stage,
    config: &StageConfig,
    registry: Registry<T>,
) -> Result<T, ConfigError> {
    let (_, construct) = registry
        .iter()
        .find(|(tag, _)| *tag == config.kind)
        .ok_or_else(|| ConfigError::UnknownType {
            stage,
            tag: config.kind.clone(),
        })?;
    construct(config)
}
