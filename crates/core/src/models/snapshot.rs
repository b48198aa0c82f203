use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::TrackedItem;

/// Current snapshot schema version.
pub const CURRENT_VERSION: u16 = 1;

fn default_version() -> u16 {
    CURRENT_VERSION
}

/// The persisted form of the engine state. Everything in here is written to
/// the store under the configuration-group key.
///
/// Every field has a serde default, and unknown fields are ignored, so older
/// and newer snapshots both load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default = "default_version")]
    pub version: u16,

    /// Tracked items in display order
    #[serde(default)]
    pub items: Vec<TrackedItem>,

    /// Most recently computed wealth
    #[serde(default, alias = "value")]
    pub wealth_value: u64,

    /// When the snapshot was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            items: Vec::new(),
            wealth_value: 0,
            saved_at: None,
        }
    }
}

impl Snapshot {
    pub fn new(items: Vec<TrackedItem>, wealth_value: u64) -> Self {
        Self {
            version: CURRENT_VERSION,
            items,
            wealth_value,
            saved_at: Some(Utc::now()),
        }
    }
}
