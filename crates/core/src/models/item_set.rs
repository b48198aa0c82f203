use super::item::{ItemId, TrackedItem};

/// Result of [`TrackedItemSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was appended
    Added,
    /// An item with the same id is already tracked; nothing changed
    AlreadyPresent,
}

/// Result of [`TrackedItemSet::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Insertion-ordered list of tracked items, unique by `item_id`.
///
/// Backed by a `Vec` in display order; lookups are linear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedItemSet {
    items: Vec<TrackedItem>,
}

impl TrackedItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an arbitrary sequence, keeping the first occurrence of
    /// each id. Returns the set and the number of duplicates dropped.
    pub fn from_items(items: impl IntoIterator<Item = TrackedItem>) -> (Self, usize) {
        let mut set = Self::new();
        let mut dropped = 0;
        for item in items {
            if set.add(item) == AddOutcome::AlreadyPresent {
                dropped += 1;
            }
        }
        (set, dropped)
    }

    /// Append `item` unless an item with the same id is already tracked.
    pub fn add(&mut self, item: TrackedItem) -> AddOutcome {
        if self.contains(item.item_id) {
            return AddOutcome::AlreadyPresent;
        }
        self.items.push(item);
        AddOutcome::Added
    }

    /// Remove the item with `item_id`, preserving the order of the rest.
    pub fn remove(&mut self, item_id: ItemId) -> RemoveOutcome {
        match self.position(item_id) {
            Some(idx) => {
                self.items.remove(idx);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// Set the cached unit price. Returns `false` if the item isn't tracked.
    pub fn update_price(&mut self, item_id: ItemId, new_price: u64) -> bool {
        match self.items.iter_mut().find(|i| i.item_id == item_id) {
            Some(item) => {
                item.unit_price = new_price;
                true
            }
            None => false,
        }
    }

    /// Read-only view of all items, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[TrackedItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<&TrackedItem> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    #[must_use]
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.position(item_id).is_some()
    }

    /// Ids of all tracked items, in insertion order.
    #[must_use]
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.item_id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.item_id == item_id)
    }
}
