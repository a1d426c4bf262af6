use serde::{Deserialize, Serialize};

use super::{Experience, Hunger, Item};

/// Health of a freshly spawned player.
pub const DEFAULT_HEALTH: f64 = 20.0;

/// Everything a consumption strategy may draw from, captured at one moment.
///
/// Strategies never touch the caller's value: the pipeline clones it before the
/// consumption tree runs and leaves mutate only that private copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub hunger: Hunger,
    #[serde(default = "default_health")]
    pub health: f64,
}

fn default_health() -> f64 {
    DEFAULT_HEALTH
}

impl Default for ResourceState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            experience: Experience::ZERO,
            hunger: Hunger::default(),
            health: DEFAULT_HEALTH,
        }
    }
}

impl ResourceState {
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    pub fn with_experience(mut self, experience: impl Into<Experience>) -> Self {
        self.experience = experience.into();
        self
    }

    pub fn with_hunger(mut self, hunger: Hunger) -> Self {
        self.hunger = hunger;
        self
    }

    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    /// Total units of `id` across every stack, regardless of components.
    pub fn count_of(&self, id: &str) -> u64 {
        self.items
            .iter()
            .filter(|item| item.id == id)
            .map(|item| item.count)
            .sum()
    }

    /// Adds an item, merging it into the first stack it can join.
    pub fn push_item(&mut self, item: Item) {
        if item.count == 0 {
            return;
        }
        match self
            .items
            .iter_mut()
            .find(|existing| existing.can_stack_with(&item))
        {
            Some(existing) => existing.count += item.count,
            None => self.items.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_fresh_player() {
        let state = ResourceState::default();
        assert!(state.items.is_empty());
        assert_eq!(state.experience, Experience::ZERO);
        assert_eq!(state.hunger.total(), 25.0);
        assert_eq!(state.health, DEFAULT_HEALTH);
    }

    #[test]
    fn push_item_merges_stackable_entries() {
        let mut state = ResourceState::default();
        state.push_item(Item::new("minecraft:bread", 3));
        state.push_item(Item::new("minecraft:apple", 1));
        state.push_item(Item::new("minecraft:bread", 2));
        state.push_item(Item::new("minecraft:apple", 0));

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.count_of("minecraft:bread"), 5);
        assert_eq!(state.count_of("minecraft:apple"), 1);
        assert_eq!(state.count_of("minecraft:cake"), 0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let state: ResourceState = serde_json::from_str(r#"{"experience": 42}"#).unwrap();
        assert_eq!(state.experience.points, 42);
        assert_eq!(state.health, DEFAULT_HEALTH);
        assert_eq!(state.hunger, Hunger::default());
    }
}
