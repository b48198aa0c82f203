pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;
pub mod view;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use errors::CoreError;
use models::{
    item::{ItemId, TrackedItem},
    item_set::{AddOutcome, RemoveOutcome, TrackedItemSet},
    progress::ProgressReport,
    settings::Settings,
    snapshot::Snapshot,
};
use providers::traits::{PriceSource, ValuationSource};
use services::progress_service::ProgressService;
use storage::{manager::StorageManager, traits::PersistenceStore};
use view::{ViewEvent, ViewNotifier};

/// What [`ProgressEngine::load_from_store`] found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A snapshot was restored
    Restored {
        items: usize,
        wealth: u64,
        /// Entries skipped because their id was already seen
        duplicates_dropped: usize,
    },
    /// Nothing saved yet; state is empty
    FirstRun,
    /// The snapshot could not be read or decoded; state is empty
    Recovered { reason: String },
}

/// A single item whose price lookup failed during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFailure {
    pub item_id: ItemId,
    pub reason: String,
}

/// Per-cycle result of a completed refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Items whose cached price was written
    pub updated: usize,
    /// Of those, how many actually changed value
    pub changed: usize,
    pub failed: Vec<PriceFailure>,
}

/// What [`ProgressEngine::refresh_prices`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed(RefreshSummary),
    /// Another refresh was still running; this one did nothing
    Skipped,
}

/// Mutable engine state. Only touched under the engine's `RwLock`.
#[derive(Debug, Default)]
struct EngineState {
    items: TrackedItemSet,
    wealth: u64,
    /// Sequence number of the valuation request that set `wealth`.
    wealth_seq: u64,
    /// Tracks whether in-memory state differs from the last successful save/load.
    dirty: bool,
}

/// Main entry point for the purchase-progress core.
///
/// Owns the tracked items and the wealth value, and is the only thing that
/// mutates them. Every mutating operation holds the state write lock for its
/// whole read-modify-write (including the store write), so no two of them
/// interleave. Price and valuation lookups run outside the lock.
///
/// The engine owns no timer and subscribes to nothing: a
/// [`RefreshScheduler`](services::scheduler::RefreshScheduler) calls
/// [`refresh_prices`](Self::refresh_prices) and the host calls
/// [`update_wealth`](Self::update_wealth) when the bank is rebuilt.
#[must_use]
pub struct ProgressEngine {
    settings: Settings,
    price_source: Arc<dyn PriceSource>,
    valuation: Arc<dyn ValuationSource>,
    store: Arc<dyn PersistenceStore>,
    notifier: ViewNotifier,
    progress_service: ProgressService,
    state: RwLock<EngineState>,
    /// Held for the duration of a refresh cycle.
    refresh_guard: Mutex<()>,
    /// Last sequence number handed to an `update_wealth` call.
    wealth_requests: AtomicU64,
}

impl std::fmt::Debug for ProgressEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressEngine")
            .field("config_group", &self.settings.config_group)
            .field("price_source", &self.price_source.name())
            .field("state", &self.state)
            .finish()
    }
}

impl ProgressEngine {
    /// Build an engine with empty state. Call [`load_from_store`](Self::load_from_store)
    /// to restore the previous session.
    pub fn new(
        settings: Settings,
        price_source: Arc<dyn PriceSource>,
        valuation: Arc<dyn ValuationSource>,
        store: Arc<dyn PersistenceStore>,
        notifier: ViewNotifier,
    ) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self {
            settings,
            price_source,
            valuation,
            store,
            notifier,
            progress_service: ProgressService::new(),
            state: RwLock::new(EngineState::default()),
            refresh_guard: Mutex::new(()),
            wealth_requests: AtomicU64::new(0),
        })
    }

    // ── Item Management ─────────────────────────────────────────────

    /// Start tracking `item`.
    ///
    /// On `Added` the snapshot is saved and the view is switched to the
    /// progress list. On `AlreadyPresent` the view gets a duplicate warning
    /// and nothing else happens. A zero target quantity is rejected before
    /// any state change.
    pub async fn request_add(&self, item: TrackedItem) -> Result<AddOutcome, CoreError> {
        if item.target_quantity == 0 {
            return Err(CoreError::ValidationError(format!(
                "Target quantity for item {} must be at least 1",
                item.item_id
            )));
        }

        let item_id = item.item_id;
        let mut state = self.state.write().await;
        let outcome = state.items.add(item);

        match outcome {
            AddOutcome::Added => {
                tracing::debug!(item_id, "Tracking new item");
                state.dirty = true;
                self.save_after_mutation(&mut state).await;
                self.notifier.notify(ViewEvent::SwitchToProgress);
                self.render(&state);
            }
            AddOutcome::AlreadyPresent => {
                tracing::debug!(item_id, "Item already tracked");
                self.notifier.notify(ViewEvent::DuplicateWarning);
            }
        }

        Ok(outcome)
    }

    /// Stop tracking `item_id`. Removing an untracked id is a silent no-op.
    pub async fn request_remove(&self, item_id: ItemId) -> RemoveOutcome {
        let mut state = self.state.write().await;
        let outcome = state.items.remove(item_id);

        if outcome == RemoveOutcome::Removed {
            tracing::debug!(item_id, "Stopped tracking item");
            state.dirty = true;
            self.save_after_mutation(&mut state).await;
            self.render(&state);
        }

        outcome
    }

    // ── Prices & Wealth ─────────────────────────────────────────────

    /// Re-query the unit price of every tracked item.
    ///
    /// A failed lookup leaves that item's cached price alone and is reported
    /// in the summary; the remaining items are still refreshed. Items removed
    /// while lookups were in flight are skipped. Returns `Skipped` without
    /// doing anything if another refresh is still running.
    pub async fn refresh_prices(&self) -> RefreshOutcome {
        let Ok(_guard) = self.refresh_guard.try_lock() else {
            tracing::debug!("Price refresh already running; skipping this cycle");
            return RefreshOutcome::Skipped;
        };

        let item_ids = self.state.read().await.items.item_ids();

        let mut prices = Vec::with_capacity(item_ids.len());
        let mut failed = Vec::new();
        for item_id in item_ids {
            match self.price_source.get_price(item_id).await {
                Ok(price) => prices.push((item_id, price)),
                Err(e) => {
                    tracing::warn!(
                        item_id,
                        source = self.price_source.name(),
                        error = %e,
                        "Price lookup failed; keeping cached price"
                    );
                    failed.push(PriceFailure {
                        item_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut state = self.state.write().await;
        let mut summary = RefreshSummary {
            failed,
            ..RefreshSummary::default()
        };

        for (item_id, price) in prices {
            let previous = state.items.get(item_id).map(|i| i.unit_price);
            if state.items.update_price(item_id, price) {
                summary.updated += 1;
                if previous != Some(price) {
                    summary.changed += 1;
                }
                tracing::debug!(item_id, price, "Updated cached price");
            }
        }

        if summary.changed > 0 {
            state.dirty = true;
            if self.settings.persist_after_refresh {
                self.save_after_mutation(&mut state).await;
            }
        }

        self.render(&state);
        RefreshOutcome::Completed(summary)
    }

    /// Ask the valuation source for the current wealth and store it.
    ///
    /// On failure the previous wealth value is kept and nothing is saved.
    /// Calls may overlap: a valuation that finishes after a newer call's
    /// result was applied is discarded. Returns the wealth value in effect.
    pub async fn update_wealth(&self) -> Result<u64, CoreError> {
        let seq = self.wealth_requests.fetch_add(1, Ordering::SeqCst) + 1;
        let wealth = self.valuation.get_wealth().await.map_err(|e| {
            tracing::warn!(error = %e, "Wealth valuation failed; keeping previous value");
            e
        })?;

        let mut state = self.state.write().await;
        if seq < state.wealth_seq {
            tracing::debug!(seq, applied = state.wealth_seq, "Discarding stale wealth valuation");
            return Ok(state.wealth);
        }
        state.wealth = wealth;
        state.wealth_seq = seq;
        state.dirty = true;
        self.save_after_mutation(&mut state).await;
        self.render(&state);

        Ok(wealth)
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Replace in-memory state with the saved snapshot.
    ///
    /// A missing snapshot means a first run; an unreadable one is logged and
    /// treated the same way. Either way the state ends up empty with zero
    /// wealth. Repeated calls without mutations in between give the same state.
    pub async fn load_from_store(&self) -> LoadOutcome {
        let key = self.store_key();
        let mut state = self.state.write().await;

        let outcome = match StorageManager::load_blocking(self.store.clone(), key).await {
            Ok(Some(snapshot)) => {
                let (items, duplicates_dropped) = TrackedItemSet::from_items(snapshot.items);
                if duplicates_dropped > 0 {
                    tracing::warn!(
                        duplicates_dropped,
                        "Snapshot contained duplicate item ids; kept first occurrence"
                    );
                }
                state.items = items;
                state.wealth = snapshot.wealth_value;
                LoadOutcome::Restored {
                    items: state.items.len(),
                    wealth: state.wealth,
                    duplicates_dropped,
                }
            }
            Ok(None) => {
                state.items = TrackedItemSet::new();
                state.wealth = 0;
                LoadOutcome::FirstRun
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Saved snapshot unreadable; starting empty");
                state.items = TrackedItemSet::new();
                state.wealth = 0;
                LoadOutcome::Recovered {
                    reason: e.to_string(),
                }
            }
        };
        state.dirty = false;

        tracing::info!(key, outcome = ?outcome, "Loaded purchase progress");
        self.render(&state);
        outcome
    }

    /// Write the current state to the store, replacing the previous snapshot.
    /// In-memory state is unaffected if the write fails.
    pub async fn save_to_store(&self) -> Result<(), CoreError> {
        let mut state = self.state.write().await;
        self.persist(&mut state).await
    }

    /// `load_from_store` followed by an immediate `refresh_prices`.
    pub async fn startup(&self) -> (LoadOutcome, RefreshOutcome) {
        let loaded = self.load_from_store().await;
        let refreshed = self.refresh_prices().await;
        (loaded, refreshed)
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Copy of all tracked items, in display order.
    pub async fn items(&self) -> Vec<TrackedItem> {
        self.state.read().await.items.all().to_vec()
    }

    pub async fn wealth(&self) -> u64 {
        self.state.read().await.wealth
    }

    /// Items and wealth taken under the same read lock.
    pub async fn view_state(&self) -> (Vec<TrackedItem>, u64) {
        let state = self.state.read().await;
        (state.items.all().to_vec(), state.wealth)
    }

    /// Progress of every target against the current wealth.
    pub async fn progress_report(&self) -> ProgressReport {
        let state = self.state.read().await;
        self.progress_service.report(state.items.all(), state.wealth)
    }

    /// Returns `true` if state has changed since the last successful save or load.
    pub async fn has_unsaved_changes(&self) -> bool {
        self.state.read().await.dirty
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Key the snapshot is stored under.
    #[must_use]
    pub fn store_key(&self) -> &str {
        &self.settings.config_group
    }

    // ── Internal ────────────────────────────────────────────────────

    /// The caller holds the write lock until the store write returns, so
    /// snapshots land in mutation order.
    async fn persist(&self, state: &mut EngineState) -> Result<(), CoreError> {
        let snapshot = Snapshot::new(state.items.all().to_vec(), state.wealth);
        StorageManager::save_blocking(self.store.clone(), self.store_key(), &snapshot).await?;
        state.dirty = false;
        Ok(())
    }

    /// Save triggered by a mutation. The mutation stands either way; a failed
    /// write leaves the engine dirty so a later `save_to_store` can retry.
    async fn save_after_mutation(&self, state: &mut EngineState) {
        if let Err(e) = self.persist(state).await {
            tracing::error!(key = self.store_key(), error = %e, "Failed to save purchase progress");
        }
    }

    fn render(&self, state: &EngineState) {
        self.notifier.render(state.items.all().to_vec(), state.wealth);
    }
}
