use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use super::traits::ValuationSource;
use crate::errors::CoreError;

/// Valuation source for hosts that compute wealth themselves.
///
/// The host pushes the latest figure with [`FixedValuation::set`] and then
/// asks the engine to `update_wealth`.
#[derive(Debug, Default)]
pub struct FixedValuation {
    amount: AtomicU64,
}

impl FixedValuation {
    pub fn new(amount: u64) -> Self {
        Self {
            amount: AtomicU64::new(amount),
        }
    }

    pub fn set(&self, amount: u64) {
        self.amount.store(amount, Ordering::SeqCst);
    }

    #[must_use]
    pub fn get(&self) -> u64 {
        self.amount.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValuationSource for FixedValuation {
    async fn get_wealth(&self) -> Result<u64, CoreError> {
        Ok(self.get())
    }
}
