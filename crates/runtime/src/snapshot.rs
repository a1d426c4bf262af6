//! Player data documents.
//!
//! Servers expose a player's NBT as JSON. Only the fields the cost engine reads
//! are decoded; everything else is ignored.

use std::collections::BTreeMap;

use cost_core::{
    DEFAULT_DIMENSION, DEFAULT_HEALTH, Experience, Hunger, Item, Position, ResourceState, Vec3,
};
use serde::Deserialize;

/// Resources and position of one player at one moment.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub resources: ResourceState,
    pub position: Position,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PlayerData {
    #[serde(default)]
    inventory: Vec<Item>,
    /// Slot name to item.
    #[serde(default, rename = "equipment")]
    equipment: BTreeMap<String, Item>,
    #[serde(default)]
    xp_total: i64,
    #[serde(default = "full_food", rename = "foodLevel")]
    food_level: u32,
    #[serde(default = "fresh_saturation", rename = "foodSaturationLevel")]
    food_saturation_level: f64,
    #[serde(default, rename = "foodExhaustionLevel")]
    food_exhaustion_level: f64,
    #[serde(default = "full_health")]
    health: f64,
    pos: [f64; 3],
    /// `[yaw, pitch]`
    #[serde(default)]
    rotation: [f64; 2],
    #[serde(default = "overworld")]
    dimension: String,
}

fn full_food() -> u32 {
    Hunger::MAX_LEVEL
}

fn fresh_saturation() -> f64 {
    Hunger::default().saturation_level
}

fn full_health() -> f64 {
    DEFAULT_HEALTH
}

fn overworld() -> String {
    DEFAULT_DIMENSION.to_string()
}

impl PlayerSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<PlayerData>(json).map(Self::from)
    }

    pub fn from_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value::<PlayerData>(value).map(Self::from)
    }
}

impl From<PlayerData> for PlayerSnapshot {
    fn from(data: PlayerData) -> Self {
        let mut resources = ResourceState::default()
            .with_experience(Experience::new(data.xp_total))
            .with_hunger(Hunger::new(
                data.food_level,
                data.food_saturation_level,
                data.food_exhaustion_level,
            ))
            .with_health(data.health);

        // Equal id and components merge into one stack, first occurrence first.
        for item in data.inventory.into_iter().chain(data.equipment.into_values()) {
            resources.push_item(item);
        }

        let [yaw, pitch] = data.rotation;
        let position =
            Position::new(Vec3::from(data.pos), data.dimension).with_rotation(yaw, pitch);

        Self {
            resources,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stacks_are_merged_across_inventory_and_equipment() {
        let snapshot = PlayerSnapshot::from_value(json!({
            "Inventory": [
                { "Slot": 0, "id": "minecraft:bread", "count": 5 },
                { "Slot": 1, "id": "minecraft:apple", "count": 2 },
                { "Slot": 2, "id": "minecraft:bread", "count": 3 },
                {
                    "Slot": 3,
                    "id": "minecraft:bread",
                    "count": 1,
                    "components": { "minecraft:custom_name": "Lembas" },
                },
            ],
            "equipment": {
                "offhand": { "id": "minecraft:apple", "count": 4 },
            },
            "Pos": [1.5, 64.0, -3.5],
        }))
        .unwrap();

        let items = &snapshot.resources.items;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Item::new("minecraft:bread", 8));
        assert_eq!(items[1], Item::new("minecraft:apple", 6));
        assert_eq!(items[2].count, 1);
        assert_eq!(snapshot.resources.count_of("minecraft:bread"), 9);
    }

    #[test]
    fn scalar_fields_are_read() {
        let snapshot = PlayerSnapshot::from_json(
            r#"{
                "XpTotal": 352,
                "foodLevel": 17,
                "foodSaturationLevel": 2.5,
                "foodExhaustionLevel": 1.0,
                "Health": 12.0,
                "Pos": [10.0, 70.0, 20.0],
                "Rotation": [90.0, -15.0],
                "Dimension": "minecraft:the_nether"
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.resources.experience, Experience::new(352));
        assert_eq!(snapshot.resources.hunger, Hunger::new(17, 2.5, 1.0));
        assert_eq!(snapshot.resources.health, 12.0);
        assert_eq!(snapshot.position.coordinate, Vec3::new(10.0, 70.0, 20.0));
        assert_eq!(snapshot.position.yaw, 90.0);
        assert_eq!(snapshot.position.pitch, -15.0);
        assert_eq!(snapshot.position.dimension, "minecraft:the_nether");
    }

    #[test]
    fn missing_fields_use_fresh_player_values() {
        let snapshot = PlayerSnapshot::from_json(r#"{ "Pos": [0, 0, 0] }"#).unwrap();
        assert_eq!(snapshot.resources, ResourceState::default());
        assert_eq!(snapshot.position.dimension, DEFAULT_DIMENSION);
    }

    #[test]
    fn position_is_required() {
        assert!(PlayerSnapshot::from_json(r#"{ "XpTotal": 3 }"#).is_err());
    }
}
