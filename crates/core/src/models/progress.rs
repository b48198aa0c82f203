use serde::{Deserialize, Serialize};

use super::item::TrackedItem;

/// Progress toward a single purchase target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProgress {
    /// The tracked item, including its cached unit price
    pub item: TrackedItem,

    /// unit_price × target_quantity
    pub total_cost: u64,

    /// wealth / total_cost × 100, capped at 100
    pub progress_pct: f64,

    /// How much wealth is still missing (0 once affordable)
    pub remaining: u64,
}

impl ItemProgress {
    #[must_use]
    pub fn is_affordable(&self) -> bool {
        self.remaining == 0
    }
}

/// Progress of all targets against the current wealth value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Wealth the report was computed against
    pub wealth: u64,

    /// Per-item breakdown, in display order
    pub items: Vec<ItemProgress>,

    /// Sum of all items' total cost
    pub total_cost: u64,

    /// Progress toward buying every target at once
    pub overall_pct: f64,

    /// Wealth still missing to buy every target at once
    pub remaining: u64,
}
