//! Experience points and the level curve.
//!
//! Levels follow the vanilla piecewise curve:
//! - `L ≤ 16`: `L² + 6L`
//! - `L ≤ 31`: `2.5L² − 40.5L + 360`
//! - otherwise: `4.5L² − 162.5L + 2220`
//!
//! For integer levels every branch is an exact integer, so the curve is evaluated
//! in `i128` to stay exact while the level search doubles its upper bound.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Raw experience point total.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Experience {
    pub points: i64,
}

/// Whole level reached by a point total plus the points left over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: i64,
    pub remainder: i64,
}

fn curve(level: i128) -> i128 {
    let l = level.abs();
    let points = if l <= 16 {
        l * l + 6 * l
    } else if l <= 31 {
        (5 * l * l - 81 * l) / 2 + 360
    } else {
        (9 * l * l - 325 * l) / 2 + 2220
    };
    points * level.signum()
}

fn saturate(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl Experience {
    pub const ZERO: Self = Self { points: 0 };

    pub const fn new(points: i64) -> Self {
        Self { points }
    }

    /// Total points needed to reach `level` from zero (sign preserved).
    pub fn from_level(level: i64) -> Self {
        Self::new(saturate(curve(level as i128)))
    }

    /// Largest level `L` with `from_level(L) ≤ |points|`, and the leftover points.
    ///
    /// Negative totals mirror the result: both fields come back negated.
    pub fn to_level(self) -> LevelProgress {
        let target = (self.points as i128).abs();

        let mut high: i128 = 1;
        while curve(high) <= target {
            high *= 2;
        }

        let mut low: i128 = 0;
        let mut best: i128 = 0;
        while low <= high {
            let mid = (low + high) / 2;
            if curve(mid) <= target {
                best = mid;
                low = mid + 1;
            } else {
                high = mid - 1;
            }
        }

        let remainder = target - curve(best);
        if self.points < 0 {
            LevelProgress {
                level: -saturate(best),
                remainder: -saturate(remainder),
            }
        } else {
            LevelProgress {
                level: saturate(best),
                remainder: saturate(remainder),
            }
        }
    }

    /// Fractional level equivalent: whole level plus progress towards the next.
    pub fn level_progress(self) -> f64 {
        let progress = self.to_level();
        let level = progress.level.abs();
        let span = curve(level as i128 + 1) - curve(level as i128);
        let fraction = progress.remainder.abs() as f64 / span as f64;
        let value = level as f64 + fraction;
        if self.points < 0 { -value } else { value }
    }

    /// Point total at a fractional level, floored. Non-positive levels map to zero.
    pub fn points_at_level(level: f64) -> Self {
        if level.is_nan() || level <= 0.0 {
            return Self::ZERO;
        }
        // Level i32::MAX already exceeds every representable point total.
        let whole = level.floor().min(i32::MAX as f64);
        let base = curve(whole as i128);
        let span = curve(whole as i128 + 1) - base;
        // Tolerance absorbs float noise from `level_progress` round trips.
        let partial = ((level - whole).min(1.0) * span as f64 + 1e-9).floor() as i128;
        Self::new(saturate(base + partial))
    }

    pub fn abs(self) -> Self {
        Self::new(self.points.saturating_abs())
    }
}

impl From<i64> for Experience {
    fn from(points: i64) -> Self {
        Self::new(points)
    }
}

impl Add for Experience {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.points + rhs.points)
    }
}

impl Add<i64> for Experience {
    type Output = Self;
    fn add(self, rhs: i64) -> Self {
        Self::new(self.points + rhs)
    }
}

impl AddAssign for Experience {
    fn add_assign(&mut self, rhs: Self) {
        self.points += rhs.points;
    }
}

impl AddAssign<i64> for Experience {
    fn add_assign(&mut self, rhs: i64) {
        self.points += rhs;
    }
}

impl Sub for Experience {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.points - rhs.points)
    }
}

impl Sub<i64> for Experience {
    type Output = Self;
    fn sub(self, rhs: i64) -> Self {
        Self::new(self.points - rhs)
    }
}

impl SubAssign for Experience {
    fn sub_assign(&mut self, rhs: Self) {
        self.points -= rhs.points;
    }
}

impl SubAssign<i64> for Experience {
    fn sub_assign(&mut self, rhs: i64) {
        self.points -= rhs;
    }
}

impl Mul<i64> for Experience {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self::new(self.points * rhs)
    }
}

impl Neg for Experience {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_matches_vanilla_breakpoints() {
        assert_eq!(Experience::from_level(0).points, 0);
        assert_eq!(Experience::from_level(1).points, 7);
        assert_eq!(Experience::from_level(16).points, 352);
        assert_eq!(Experience::from_level(17).points, 394);
        assert_eq!(Experience::from_level(31).points, 1507);
        assert_eq!(Experience::from_level(32).points, 1628);
        assert_eq!(Experience::from_level(-16).points, -352);
    }

    #[test]
    fn to_level_brackets_every_point_total() {
        for points in 0..5_000 {
            let progress = Experience::new(points).to_level();
            let floor = Experience::from_level(progress.level).points;
            let next = Experience::from_level(progress.level + 1).points;
            assert!(floor <= points && points < next, "points {points}");
            assert_eq!(progress.remainder, points - floor);
        }
    }

    #[test]
    fn to_level_handles_huge_totals() {
        let progress = Experience::new(i64::MAX).to_level();
        assert!(progress.level > 0);
        assert!(Experience::from_level(progress.level).points <= i64::MAX);
    }

    #[test]
    fn negative_totals_mirror() {
        let progress = Experience::new(-10).to_level();
        assert_eq!(progress.level, -1);
        assert_eq!(progress.remainder, -3);
    }

    #[test]
    fn level_progress_interpolates_within_level() {
        // Level 1 spans 7..16 (9 points); 7 + 3 points is one third of the way.
        let exp = Experience::new(10);
        let progress = exp.level_progress();
        assert!((progress - (1.0 + 3.0 / 9.0)).abs() < 1e-12);
        assert_eq!(Experience::points_at_level(progress), exp);
    }

    #[test]
    fn points_at_level_floors_and_clamps() {
        assert_eq!(Experience::points_at_level(-2.0), Experience::ZERO);
        assert_eq!(Experience::points_at_level(2.0), Experience::from_level(2));
        assert_eq!(Experience::points_at_level(1.5).points, 7 + 4);
    }

    #[test]
    fn arithmetic_mixes_with_raw_points() {
        let mut exp = Experience::new(100);
        exp -= 30;
        exp += Experience::new(5);
        assert_eq!(exp, Experience::new(75));
        assert_eq!(-exp, Experience::new(-75));
        assert_eq!((exp - 80).abs(), Experience::new(5));
        assert_eq!(exp * 2, Experience::new(150));
    }
}
