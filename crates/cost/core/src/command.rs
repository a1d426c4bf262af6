//! Effect commands emitted by consumption strategies.
//!
//! Commands are opaque to the engine. They are written relative to the charged
//! player (`@s`), so hosts run them as that player.

/// Textual effect command for an external executor.
pub type Command = String;

/// Removes `points` raw experience points.
pub fn take_experience(points: i64) -> Command {
    format!("xp add @s -{points} points")
}

/// Removes `count` items matching the `clear` predicate `component`.
pub fn clear_items(component: &str, count: u64) -> Command {
    format!("clear @s {component} {count}")
}

/// Applies the hunger effect; `amplifier` is zero based.
pub fn hunger_effect(duration: u64, amplifier: u32) -> Command {
    format!("effect give @s minecraft:hunger {duration} {amplifier}")
}

pub fn damage(amount: f64, damage_type: &str) -> Command {
    format!("damage @s {amount} {damage_type}")
}
