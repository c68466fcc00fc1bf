//! Client for the venue's futures (contract) REST depth endpoint.
//!
//! Unlike the spot endpoint, the contract API wraps its payload in a
//! success/code envelope, sends prices and volumes as JSON numbers and
//! appends a per-level order count, which is dropped during conversion.

use std::time::Duration;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::timeout;

use crate::api::SnapshotSource;
use crate::config::{Config, MarketType};
use crate::orderbook::{OrderBookSnapshot, RawValue};

pub struct FuturesClient {
    base_url: String,
    symbol: String,
    request_timeout: Duration,
}

impl FuturesClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.futures_api_url.clone(),
            symbol: config.currency_pair.symbol_for(MarketType::Futures),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// The envelope the contract API wraps every response in.
#[derive(Debug, Deserialize)]
struct DepthResponse {
    success: bool,
    code: i64,
    data: Option<DepthPayload>,
}

/// The depth payload: levels are [price, volume, order count] triples.
#[derive(Debug, Deserialize)]
struct DepthPayload {
    asks: Vec<(f64, f64, u64)>,
    bids: Vec<(f64, f64, u64)>,
}

impl From<DepthPayload> for OrderBookSnapshot {
    fn from(payload: DepthPayload) -> Self {
        OrderBookSnapshot::from_asks_bids(
            payload.asks.into_iter().map(raw_pair).collect(),
            payload.bids.into_iter().map(raw_pair).collect(),
        )
    }
}

fn raw_pair((price, volume, _order_count): (f64, f64, u64)) -> (RawValue, RawValue) {
    (RawValue::Number(price), RawValue::Number(volume))
}

#[async_trait]
impl SnapshotSource for FuturesClient {
    async fn fetch_snapshot(&self, limit: usize) -> anyhow::Result<OrderBookSnapshot> {
        let url = format!("{}/depth/{}?limit={}", self.base_url, self.symbol, limit);
        log::debug!("requesting futures depth snapshot: {url}");
        // wrap the rest request in a timer so a stalled venue can't hang the caller
        let response: DepthResponse = timeout(self.request_timeout, async {
            reqwest::get(&url).await?.error_for_status()?.json().await
        })
        .await
        .context("futures depth request timed out")??;
        if !response.success {
            bail!("venue rejected depth request with code {}", response.code);
        }
        let payload = response
            .data
            .context("venue response carried no depth payload")?;
        Ok(payload.into())
    }
}
