//! Client for the venue's spot REST depth endpoint.
//!
//! The endpoint returns both sides as arrays of [price, quantity] string
//! pairs together with an update id, so the response deserializes straight
//! into [OrderBookSnapshot].

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::api::SnapshotSource;
use crate::config::{Config, MarketType};
use crate::orderbook::OrderBookSnapshot;

pub struct SpotClient {
    base_url: String,
    symbol: String,
    request_timeout: Duration,
}

impl SpotClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.spot_api_url.clone(),
            symbol: config.currency_pair.symbol_for(MarketType::Spot),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

#[async_trait]
impl SnapshotSource for SpotClient {
    async fn fetch_snapshot(&self, limit: usize) -> anyhow::Result<OrderBookSnapshot> {
        let url = format!(
            "{}/depth?symbol={}&limit={}",
            self.base_url, self.symbol, limit
        );
        log::debug!("requesting spot depth snapshot: {url}");
        // wrap the rest request in a timer so a stalled venue can't hang the caller
        let snapshot: OrderBookSnapshot = timeout(self.request_timeout, async {
            reqwest::get(&url).await?.error_for_status()?.json().await
        })
        .await
        .context("spot depth request timed out")??;
        Ok(snapshot)
    }
}
