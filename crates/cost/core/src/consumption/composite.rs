use rand::Rng;
use serde::Deserialize;

use super::{CheckStrategy, Consumption, Outcome, PassStrategy, Policy};
use crate::config::StageConfig;
use crate::error::{ConfigError, ConsumptionError, Stage};
use crate::resource::ResourceState;

#[derive(Debug, Deserialize)]
struct CompositeParams {
    #[serde(default)]
    costs: Vec<StageConfig>,
}

/// Applies child nodes in order.
///
/// - Children see the running remainder only when the composite propagates;
///   otherwise every child is charged the original value.
/// - A child's shortfall aborts under strict. Under lenient the child is
///   skipped and the resources are rolled back to before it ran.
/// - Errors other than shortfalls always abort.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeCost {
    pub(crate) policy: Policy,
    costs: Vec<Consumption>,
}

impl CompositeCost {
    pub fn new(policy: Policy, costs: Vec<Consumption>) -> Self {
        Self { policy, costs }
    }

    pub(crate) fn from_config(config: &StageConfig) -> Result<Self, ConfigError> {
        let policy: Policy = config.params(Stage::Consumption)?;
        let params: CompositeParams = config.params(Stage::Consumption)?;
        let costs = params
            .costs
            .iter()
            .map(Consumption::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(policy, costs))
    }

    pub fn costs(&self) -> &[Consumption] {
        &self.costs
    }

    pub(crate) fn apply<R: Rng + ?Sized>(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
        rng: &mut R,
    ) -> Result<Outcome, ConsumptionError> {
        let propagate = self.policy.pass_strategy == PassStrategy::Propagate;
        let lenient = self.policy.check_strategy == CheckStrategy::Lenient;

        let mut remaining = cost_value;
        let mut commands = Vec::new();
        for (index, child) in self.costs.iter().enumerate() {
            let input = if propagate { remaining } else { cost_value };
            let before = lenient.then(|| resources.clone());

            match child.apply_cost(input, resources, rng) {
                Ok(outcome) => {
                    remaining = outcome.remaining;
                    commands.extend(outcome.commands);
                }
                Err(ConsumptionError::Insufficient(shortfall)) if lenient => {
                    tracing::debug!(index, %shortfall, "skipping child that cannot pay");
                    if let Some(before) = before {
                        *resources = before;
                    }
                }
                Err(err) => return Err(err),
            }
        }

        let remaining = if propagate { remaining } else { cost_value };
        Ok(Outcome::new(remaining, commands))
    }
}
