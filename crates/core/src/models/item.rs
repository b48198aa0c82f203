use serde::{Deserialize, Serialize};

/// Numeric game item identifier.
pub type ItemId = u32;

/// An item the user wants to afford `target_quantity` of.
///
/// **Duplicate detection** inside a [`TrackedItemSet`](super::item_set::TrackedItemSet)
/// uses `item_id` only. `PartialEq` compares every field, so two snapshots are
/// equal only if their cached prices match too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedItem {
    /// Game item id; identity of the tracked item
    pub item_id: ItemId,

    /// Display name, as given by the host when the item was added
    #[serde(default)]
    pub name: String,

    /// How many of the item the user wants to buy
    #[serde(default = "default_quantity")]
    pub target_quantity: u32,

    /// Last known unit price. Only the price-refresh cycle writes this.
    #[serde(default, alias = "gePrice")]
    pub unit_price: u64,
}

fn default_quantity() -> u32 {
    1
}

impl TrackedItem {
    /// A new target with no cached price yet.
    pub fn new(item_id: ItemId, target_quantity: u32) -> Self {
        Self {
            item_id,
            name: String::new(),
            target_quantity,
            unit_price: 0,
        }
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Seed the price cache, e.g. with the price the host showed at add time.
    pub fn with_price(mut self, unit_price: u64) -> Self {
        self.unit_price = unit_price;
        self
    }

    /// Unit price × target quantity, saturating at `u64::MAX`.
    pub fn total_cost(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.target_quantity))
    }
}
