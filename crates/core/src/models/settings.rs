use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::CoreError;

/// Persistence key used when nothing else is configured.
pub const DEFAULT_CONFIG_GROUP: &str = "purchaseprogress";

/// Price refresh period of the reference plugin (5 minutes).
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Longest accepted refresh period (one week).
pub const MAX_REFRESH_INTERVAL_SECS: u64 = 7 * 24 * 60 * 60;

pub const DEFAULT_PRICE_API_URL: &str = "https://prices.runescape.wiki/api/v1/osrs";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the snapshot is stored under.
    pub config_group: String,

    /// Seconds between scheduled price refreshes.
    pub refresh_interval_secs: u64,

    /// Save a snapshot after a refresh that changed at least one price.
    pub persist_after_refresh: bool,

    /// Base URL of the real-time prices API.
    pub price_api_url: String,

    /// User-Agent sent to the prices API (the wiki rejects blank agents).
    pub user_agent: String,

    /// Directory the file store writes snapshots into.
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_group: DEFAULT_CONFIG_GROUP.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            persist_after_refresh: false,
            price_api_url: DEFAULT_PRICE_API_URL.to_string(),
            user_agent: format!("purchase-progress/{}", env!("CARGO_PKG_VERSION")),
            data_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Defaults overlaid with `PURCHASE_PROGRESS_*` environment variables.
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            config_group: env::var("PURCHASE_PROGRESS_CONFIG_GROUP")
                .unwrap_or(defaults.config_group),
            refresh_interval_secs: env::var("PURCHASE_PROGRESS_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(defaults.refresh_interval_secs),
            persist_after_refresh: env::var("PURCHASE_PROGRESS_PERSIST_AFTER_REFRESH")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(defaults.persist_after_refresh),
            price_api_url: env::var("PURCHASE_PROGRESS_PRICE_API_URL")
                .unwrap_or(defaults.price_api_url),
            user_agent: env::var("PURCHASE_PROGRESS_USER_AGENT").unwrap_or(defaults.user_agent),
            data_dir: env::var("PURCHASE_PROGRESS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        }
    }

    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.config_group.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "config_group must not be empty".into(),
            ));
        }
        if self.refresh_interval_secs == 0 {
            return Err(CoreError::InvalidConfig(
                "refresh_interval_secs must be at least 1".into(),
            ));
        }
        if self.refresh_interval_secs > MAX_REFRESH_INTERVAL_SECS {
            return Err(CoreError::InvalidConfig(format!(
                "refresh_interval_secs must be at most {MAX_REFRESH_INTERVAL_SECS}, got {}",
                self.refresh_interval_secs
            )));
        }
        Ok(())
    }
}
