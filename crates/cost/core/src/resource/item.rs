use serde::{Deserialize, Serialize};

/// Ordered item attribute mapping (data components).
pub type Components = serde_json::Map<String, serde_json::Value>;

/// A counted stack of one item kind.
///
/// Two items stack iff their `id` and `components` are structurally equal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

/// Errors from item stack arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("cannot stack `{left}` with `{right}`: id or components differ")]
    NotStackable { left: String, right: String },
}

impl Item {
    pub fn new(id: impl Into<String>, count: u64) -> Self {
        Self {
            id: id.into(),
            count,
            components: Components::new(),
        }
    }

    pub fn with_components(mut self, components: Components) -> Self {
        self.components = components;
        self
    }

    pub fn can_stack_with(&self, other: &Self) -> bool {
        self.id == other.id && self.components == other.components
    }

    /// Merges two stackable items into a new stack.
    pub fn stack(&self, other: &Self) -> Result<Self, ItemError> {
        if !self.can_stack_with(other) {
            return Err(ItemError::NotStackable {
                left: self.to_component(),
                right: other.to_component(),
            });
        }
        Ok(Self {
            id: self.id.clone(),
            count: self.count + other.count,
            components: self.components.clone(),
        })
    }

    /// Renders the item predicate used by `clear`, e.g. `minecraft:apple` or
    /// `minecraft:potion[potion_contents={"potion":"minecraft:healing"}]`.
    pub fn to_component(&self) -> String {
        if self.components.is_empty() {
            return self.id.clone();
        }
        let components = self
            .components
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}[{}]", self.id, components)
    }
}
