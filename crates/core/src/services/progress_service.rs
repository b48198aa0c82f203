use crate::models::item::TrackedItem;
use crate::models::progress::{ItemProgress, ProgressReport};

/// Computes how far the current wealth goes toward each purchase target.
///
/// Pure business logic: no I/O, no locking. The engine feeds it a
/// consistent copy of its state.
pub struct ProgressService;

impl ProgressService {
    pub fn new() -> Self {
        Self
    }

    /// Progress of a single item against `wealth`.
    pub fn item_progress(&self, item: &TrackedItem, wealth: u64) -> ItemProgress {
        let total_cost = item.total_cost();
        ItemProgress {
            item: item.clone(),
            total_cost,
            progress_pct: Self::percentage(wealth, total_cost),
            remaining: total_cost.saturating_sub(wealth),
        }
    }

    /// Full report: every item on its own, plus all items together.
    pub fn report(&self, items: &[TrackedItem], wealth: u64) -> ProgressReport {
        let items: Vec<ItemProgress> = items
            .iter()
            .map(|item| self.item_progress(item, wealth))
            .collect();

        let total_cost = items
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.total_cost));

        ProgressReport {
            wealth,
            overall_pct: Self::percentage(wealth, total_cost),
            remaining: total_cost.saturating_sub(wealth),
            total_cost,
            items,
        }
    }

    /// wealth / cost × 100, capped at 100. A zero cost counts as reached.
    fn percentage(wealth: u64, cost: u64) -> f64 {
        if cost == 0 {
            return 100.0;
        }
        ((wealth as f64 / cost as f64) * 100.0).min(100.0)
    }
}

impl Default for ProgressService {
    fn default() -> Self {
        Self::new()
    }
}
