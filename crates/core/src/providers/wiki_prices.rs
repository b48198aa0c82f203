use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::traits::PriceSource;
use crate::errors::CoreError;
use crate::models::item::ItemId;
use crate::models::settings::Settings;

const PROVIDER: &str = "OSRS Wiki";

/// Real-time Grand Exchange prices from the OSRS Wiki prices API.
///
/// - **Free**: no API key, but a descriptive User-Agent is required.
/// - **Endpoint**: `/latest?id={item_id}`
///
/// The unit price is the mean of the latest instant-buy (`high`) and
/// instant-sell (`low`) prices, or whichever of the two is present.
pub struct WikiPriceSource {
    client: Client,
    base_url: String,
}

impl WikiPriceSource {
    pub fn new(base_url: impl Into<String>, user_agent: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.price_api_url.clone(), &settings.user_agent)
    }

    #[must_use]
    pub fn latest_url(&self, item_id: ItemId) -> String {
        format!("{}/latest?id={item_id}", self.base_url)
    }

    /// Extract the unit price for `item_id` from a `/latest` response body.
    pub fn parse_latest(body: &str, item_id: ItemId) -> Result<u64, CoreError> {
        let resp: LatestResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to parse response for item {item_id}: {e}"),
        })?;

        let entry = resp
            .data
            .get(&item_id.to_string())
            .ok_or(CoreError::PriceNotAvailable { item_id })?;

        match (entry.high, entry.low) {
            (Some(high), Some(low)) => Ok(high / 2 + low / 2 + (high % 2 + low % 2) / 2),
            (Some(price), None) | (None, Some(price)) => Ok(price),
            (None, None) => Err(CoreError::PriceNotAvailable { item_id }),
        }
    }
}

// ── Wiki API response types ─────────────────────────────────────────

#[derive(Deserialize)]
struct LatestResponse {
    data: HashMap<String, LatestEntry>,
}

#[derive(Deserialize)]
struct LatestEntry {
    high: Option<u64>,
    low: Option<u64>,
}

#[async_trait]
impl PriceSource for WikiPriceSource {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_price(&self, item_id: ItemId) -> Result<u64, CoreError> {
        let resp = self.client.get(self.latest_url(item_id)).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status} for item {item_id}"),
            });
        }

        let body = resp.text().await?;
        Self::parse_latest(&body, item_id)
    }
}
