//! Player resource snapshot and spatial value types.
//!
//! These are plain values: a host builds them per request from a game-world
//! snapshot, the engine clones and mutates its own copy, and everything is
//! dropped once the commands are produced.

mod experience;
mod hunger;
mod item;
mod position;
mod state;

pub use experience::{Experience, LevelProgress};
pub use hunger::Hunger;
pub use item::{Components, Item, ItemError};
pub use position::{DEFAULT_DIMENSION, Position, Vec3};
pub use state::{DEFAULT_HEALTH, ResourceState};

/// Resource pools a consumption strategy can draw from.
///
/// Used by insufficiency errors so hosts can pick a feedback message per pool.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Experience,
    Items,
    Hunger,
    Health,
}
