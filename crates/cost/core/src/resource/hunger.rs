use serde::{Deserialize, Serialize};

/// Food level, saturation and exhaustion of a player.
///
/// `total = level + saturation − exhaustion / 4`. Writes through
/// [`Hunger::set_total`] keep `level` within `0..=20` and push any remainder into
/// saturation. Deserialized values go through [`Hunger::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "HungerFields")]
pub struct Hunger {
    pub level: u32,
    pub saturation_level: f64,
    pub exhaustion_level: f64,
}

#[derive(Deserialize)]
struct HungerFields {
    level: u32,
    #[serde(default)]
    saturation_level: f64,
    #[serde(default)]
    exhaustion_level: f64,
}

impl From<HungerFields> for Hunger {
    fn from(fields: HungerFields) -> Self {
        Self::new(fields.level, fields.saturation_level, fields.exhaustion_level)
    }
}

impl Hunger {
    pub const MAX_LEVEL: u32 = 20;
    /// Exhaustion that costs one hunger point.
    pub const EXHAUSTION_PER_POINT: f64 = 4.0;

    pub fn new(level: u32, saturation_level: f64, exhaustion_level: f64) -> Self {
        Self {
            level: level.min(Self::MAX_LEVEL),
            saturation_level: saturation_level.max(0.0),
            exhaustion_level: exhaustion_level.max(0.0),
        }
    }

    pub fn total(&self) -> f64 {
        self.level as f64 + self.saturation_level
            - self.exhaustion_level / Self::EXHAUSTION_PER_POINT
    }

    /// Moves the pool to `total` the way the game drains and refills it.
    ///
    /// Pending exhaustion is folded in first. Lowering drains saturation before
    /// level; raising fills level up to 20 and overflows into saturation.
    /// Negative targets clamp to an empty pool.
    pub fn set_total(&mut self, total: f64) {
        let total = total.max(0.0);

        let mut level = self.level as f64;
        let mut saturation =
            self.saturation_level - self.exhaustion_level / Self::EXHAUSTION_PER_POINT;
        self.exhaustion_level = 0.0;
        if saturation < 0.0 {
            level = (level + saturation).max(0.0);
            saturation = 0.0;
        }

        let current = level + saturation;
        if total <= current {
            let mut drain = current - total;
            let from_saturation = drain.min(saturation);
            saturation -= from_saturation;
            drain -= from_saturation;
            level -= drain;
        } else {
            let mut gain = total - current;
            let to_level = gain.min(Self::MAX_LEVEL as f64 - level).max(0.0);
            level += to_level;
            gain -= to_level;
            saturation += gain;
        }

        let whole = level.floor().clamp(0.0, Self::MAX_LEVEL as f64);
        self.saturation_level = (saturation + (level - whole)).max(0.0);
        self.level = whole as u32;
    }
}

impl Default for Hunger {
    /// A freshly spawned player: full food bar with 5 saturation.
    fn default() -> Self {
        Self::new(Self::MAX_LEVEL, 5.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_counts_exhaustion_quarters() {
        let hunger = Hunger::new(20, 0.0, 0.0);
        assert_eq!(hunger.total(), 20.0);
        assert_eq!(Hunger::new(10, 2.0, 4.0).total(), 11.0);
    }

    #[test]
    fn lowering_full_bar_drains_level() {
        let mut hunger = Hunger::new(20, 0.0, 0.0);
        hunger.set_total(15.0);
        assert_eq!(hunger.level, 15);
        assert_eq!(hunger.saturation_level, 0.0);
    }

    #[test]
    fn lowering_drains_saturation_first() {
        let mut hunger = Hunger::new(10, 5.0, 0.0);
        hunger.set_total(12.0);
        assert_eq!(hunger.level, 10);
        assert_eq!(hunger.saturation_level, 2.0);

        hunger.set_total(7.5);
        assert_eq!(hunger.level, 7);
        assert_eq!(hunger.saturation_level, 0.5);
    }

    #[test]
    fn raising_overflows_into_saturation() {
        let mut hunger = Hunger::new(18, 0.0, 0.0);
        hunger.set_total(23.0);
        assert_eq!(hunger.level, 20);
        assert_eq!(hunger.saturation_level, 3.0);
    }

    #[test]
    fn exhaustion_is_folded_before_draining() {
        let mut hunger = Hunger::new(10, 0.0, 8.0);
        assert_eq!(hunger.total(), 8.0);
        hunger.set_total(6.0);
        assert_eq!(hunger.level, 6);
        assert_eq!(hunger.exhaustion_level, 0.0);
        assert_eq!(hunger.total(), 6.0);
    }

    #[test]
    fn negative_target_empties_pool() {
        let mut hunger = Hunger::default();
        hunger.set_total(-4.0);
        assert_eq!(hunger.level, 0);
        assert_eq!(hunger.saturation_level, 0.0);
        assert_eq!(hunger.total(), 0.0);
    }

    #[test]
    fn deserialized_values_are_clamped() {
        let hunger: Hunger =
            serde_json::from_str(r#"{"level": 35, "saturation_level": -2.0}"#).unwrap();
        assert_eq!(hunger, Hunger::new(20, 0.0, 0.0));
    }

    #[test]
    fn level_stays_in_range_for_any_target() {
        for step in 0..200 {
            let target = step as f64 * 0.37 - 10.0;
            let mut hunger = Hunger::new(13, 2.5, 1.0);
            hunger.set_total(target);
            assert!(hunger.level <= Hunger::MAX_LEVEL);
            assert!((hunger.total() - target.max(0.0)).abs() < 1e-9);
        }
    }
}
