//! Exchange REST API client implementations for order book snapshots.
//!
//! Clients fetch a single depth snapshot on demand and hold no state between
//! calls; there is no subscription to incremental feeds. Deciding how often
//! to refetch is the caller's responsibility.
//!
//! The venue's public depth endpoints require no authentication.

pub mod futures;
pub mod spot;

use async_trait::async_trait;

use crate::orderbook::OrderBookSnapshot;

/// A source of raw order book snapshots for one market.
#[async_trait]
pub trait SnapshotSource {
    /// Fetch one snapshot with up to `limit` levels per side.
    async fn fetch_snapshot(&self, limit: usize) -> anyhow::Result<OrderBookSnapshot>;
}
