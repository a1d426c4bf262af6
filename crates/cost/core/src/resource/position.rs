use std::fmt;

use serde::{Deserialize, Serialize};

/// Dimension assumed when a bare coordinate is promoted to a [`Position`].
pub const DEFAULT_DIMENSION: &str = "minecraft:overworld";

/// Continuous world coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Per-axis absolute differences to another coordinate.
    pub fn abs_diff(&self, other: &Self) -> [f64; 3] {
        [
            (self.x - other.x).abs(),
            (self.y - other.y).abs(),
            (self.z - other.z).abs(),
        ]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Coordinate, rotation and dimension of an entity.
///
/// Rotation is carried for hosts that restore facing after a teleport; no
/// distance calculator reads it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub coordinate: Vec3,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default = "default_dimension")]
    pub dimension: String,
}

fn default_dimension() -> String {
    DEFAULT_DIMENSION.to_string()
}

impl Position {
    pub fn new(coordinate: Vec3, dimension: impl Into<String>) -> Self {
        Self {
            coordinate,
            yaw: 0.0,
            pitch: 0.0,
            dimension: dimension.into(),
        }
    }

    pub fn with_rotation(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Returns true if both positions lie in the same dimension.
    pub fn same_dimension(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }
}

impl From<Vec3> for Position {
    fn from(coordinate: Vec3) -> Self {
        Self::new(coordinate, DEFAULT_DIMENSION)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.coordinate, self.dimension)
    }
}
