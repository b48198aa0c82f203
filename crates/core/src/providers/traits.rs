use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::item::ItemId;

/// Source of current unit prices.
///
/// The engine only calls `get_price`; lookups may be slow (network, host
/// cache), so the engine never holds its state lock across them.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    /// Current unit price of `item_id`.
    async fn get_price(&self, item_id: ItemId) -> Result<u64, CoreError>;
}

/// Source of the user's total current wealth (e.g. a bank valuation).
#[async_trait]
pub trait ValuationSource: Send + Sync {
    /// Total wealth at the time of the call.
    async fn get_wealth(&self) -> Result<u64, CoreError>;
}
