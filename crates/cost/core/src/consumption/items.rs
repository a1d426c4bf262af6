//! Paying with inventory items valued by a price table.
//!
//! Selection runs on exact decimals so that prices such as `0.1` or `1/70`
//! land on the same boundaries every time.

use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::{Outcome, Policy, default_rate, rate, to_decimal};
use crate::command::{self, Command};
use crate::config::StageConfig;
use crate::error::{ConfigError, ConsumptionError, InsufficientResources, Stage};
use crate::resource::{ResourceKind, ResourceState};

/// Order in which priced items are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemOrder {
    LowerFirst,
    #[default]
    HigherFirst,
    /// Picks one of the other two orders uniformly per call.
    Random,
}

/// Units of one item id chosen to pay a price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Take {
    pub id: String,
    pub count: u64,
}

/// Chooses how many units of each priced item pay `required`.
///
/// `prices` must be in price-table order; ties keep that order in both passes.
///
/// 1. Walk items by price (descending when `higher_first`) and take as many
///    whole units as fit under the remaining value.
/// 2. If value is still owed, walk the opposite order and top up with the fewest
///    units that cover it (ceiling division), bounded by what is left.
///
/// Non-positive prices are skipped. The result lists only non-zero takes, in
/// first-pass order. Returns `None` when a taken value leaves the decimal range.
pub fn calculate_combination(
    prices: &[(String, Decimal)],
    available: &HashMap<&str, u64>,
    required: Decimal,
    higher_first: bool,
) -> Option<Vec<Take>> {
    let by_price = |descending: bool| {
        let mut order: Vec<usize> = (0..prices.len()).collect();
        order.sort_by(|&a, &b| {
            let ordering = prices[a].1.cmp(&prices[b].1);
            if descending { ordering.reverse() } else { ordering }
        });
        order
    };
    let stock = |index: usize| available.get(prices[index].0.as_str()).copied().unwrap_or(0);

    let first = by_price(higher_first);
    let mut taken = vec![0u64; prices.len()];
    let mut remaining = required;

    for &index in &first {
        if remaining <= Decimal::ZERO {
            break;
        }
        let price = prices[index].1;
        if price <= Decimal::ZERO {
            continue;
        }
        let fits = units(remaining, price, Decimal::floor);
        let take = stock(index).min(fits);
        if take > 0 {
            taken[index] = take;
            remaining = remaining.checked_sub(Decimal::from(take).checked_mul(price)?)?;
        }
    }

    if remaining > Decimal::ZERO {
        for index in by_price(!higher_first) {
            if remaining <= Decimal::ZERO {
                break;
            }
            let price = prices[index].1;
            if price <= Decimal::ZERO {
                continue;
            }
            let left = stock(index).saturating_sub(taken[index]);
            if left == 0 {
                continue;
            }
            let needed = units(remaining, price, Decimal::ceil);
            let take = needed.min(left);
            taken[index] += take;
            remaining = remaining.checked_sub(Decimal::from(take).checked_mul(price)?)?;
        }
    }

    let takes = first
        .into_iter()
        .filter(|&index| taken[index] > 0)
        .map(|index| Take {
            id: prices[index].0.clone(),
            count: taken[index],
        })
        .collect();
    Some(takes)
}

/// Whole units of `price` in `value`, saturating when the quotient is out of range.
fn units(value: Decimal, price: Decimal, round: fn(&Decimal) -> Decimal) -> u64 {
    value
        .checked_div(price)
        .and_then(|quotient| round(&quotient).to_u64())
        .unwrap_or(u64::MAX)
}

#[derive(Debug, Deserialize)]
struct ItemParams {
    #[serde(default = "default_rate")]
    rate: f64,
    #[serde(default)]
    items: BTreeMap<String, f64>,
    #[serde(default)]
    strategy: ItemOrder,
}

/// Charges the price in items from a price table.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemValueCost {
    pub(crate) policy: Policy,
    rate: f64,
    prices: Vec<(String, Decimal)>,
    order: ItemOrder,
}

impl ItemValueCost {
    pub fn new(
        policy: Policy,
        rate: f64,
        prices: impl IntoIterator<Item = (String, Decimal)>,
        order: ItemOrder,
    ) -> Self {
        Self {
            policy,
            rate,
            prices: prices.into_iter().collect(),
            order,
        }
    }

    pub(crate) fn from_config(config: &StageConfig) -> Result<Self, ConfigError> {
        let policy: Policy = config.params(Stage::Consumption)?;
        let params: ItemParams = config.params(Stage::Consumption)?;
        let prices = params
            .items
            .into_iter()
            .map(|(item, price)| match to_decimal("price", price) {
                Ok(decimal) => Ok((item, decimal)),
                Err(_) => Err(ConfigError::InvalidPrice { item, price }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(policy, rate(params.rate)?, prices, params.strategy))
    }

    pub fn price_of(&self, id: &str) -> Option<Decimal> {
        self.prices
            .iter()
            .find(|(item, _)| item == id)
            .map(|(_, price)| *price)
    }

    pub fn order(&self) -> ItemOrder {
        self.order
    }

    pub(crate) fn apply<R: Rng + ?Sized>(
        &self,
        cost_value: f64,
        resources: &mut ResourceState,
        rng: &mut R,
    ) -> Result<Outcome, ConsumptionError> {
        let required_value = cost_value * self.rate;
        let required = to_decimal("required item value", required_value)?;

        let mut available: HashMap<&str, u64> = HashMap::new();
        for item in &resources.items {
            if self.price_of(&item.id).is_some() {
                *available.entry(item.id.as_str()).or_default() += item.count;
            }
        }

        let higher_first = match self.order {
            ItemOrder::HigherFirst => true,
            ItemOrder::LowerFirst => false,
            ItemOrder::Random => rng.gen_bool(0.5),
        };
        let unrepresentable = ConsumptionError::Unrepresentable {
            what: "paid item value",
            value: required_value,
        };
        let takes = calculate_combination(&self.prices, &available, required, higher_first)
            .ok_or_else(|| unrepresentable.clone())?;

        let total_paid = takes
            .iter()
            .try_fold(Decimal::ZERO, |sum, take| {
                let price = self.price_of(&take.id)?;
                sum.checked_add(Decimal::from(take.count).checked_mul(price)?)
            })
            .ok_or(unrepresentable)?;
        let paid = total_paid.to_f64().unwrap_or_default();

        if self.policy.is_strict() && total_paid < required {
            let shortfall = InsufficientResources::new(ResourceKind::Items, paid, required_value);
            return Err(shortfall.into());
        }

        let commands = consume(resources, &takes);
        tracing::debug!(higher_first, %total_paid, stacks = commands.len(), "charged items");

        Ok(Outcome::new(
            self.policy.remaining(cost_value, paid, self.rate),
            commands,
        ))
    }
}

/// Removes `takes` from the oldest matching stacks first, dropping emptied stacks.
fn consume(resources: &mut ResourceState, takes: &[Take]) -> Vec<Command> {
    let mut commands = Vec::new();
    for take in takes {
        let mut owed = take.count;
        for item in resources.items.iter_mut().filter(|item| item.id == take.id) {
            if owed == 0 {
                break;
            }
            let portion = owed.min(item.count);
            if portion == 0 {
                continue;
            }
            commands.push(command::clear_items(&item.to_component(), portion));
            item.count -= portion;
            owed -= portion;
        }
    }
    resources.items.retain(|item| item.count > 0);
    commands
}
