//! Persistence of raw snapshots as JSON files on disk.
//!
//! Snapshots land under `<root>/raw/<exchange>/<market>/<SYMBOL>.json` so an
//! analysis pass can run long after the scrape that produced the data. The
//! file contents are just the serde representation of [OrderBookSnapshot];
//! no bespoke format.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::Context;

use crate::config::{CurrencyPair, Exchange, MarketType};
use crate::orderbook::OrderBookSnapshot;

pub struct SnapshotStore {
    root: PathBuf,
}

impl SnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn market_dir(&self, exchange: Exchange, market: MarketType) -> PathBuf {
        self.root
            .join("raw")
            .join(String::from(&exchange))
            .join(String::from(&market))
    }

    /// The on-disk location for a snapshot of the given market and pair.
    pub fn snapshot_path(
        &self,
        exchange: Exchange,
        market: MarketType,
        pair: &CurrencyPair,
    ) -> PathBuf {
        self.market_dir(exchange, market)
            .join(format!("{}.json", pair.symbol_for(market)))
    }

    /// Write the snapshot, creating parent directories as needed, and return
    /// the path written to.
    pub fn save(
        &self,
        exchange: Exchange,
        market: MarketType,
        pair: &CurrencyPair,
        snapshot: &OrderBookSnapshot,
    ) -> anyhow::Result<PathBuf> {
        let dir = self.market_dir(exchange, market);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.json", pair.symbol_for(market)));
        let f = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(f, snapshot).context("failed to serialize snapshot")?;
        log::info!("snapshot saved to {}", path.display());
        Ok(path)
    }

    /// Read a previously saved snapshot back.
    pub fn load(
        &self,
        exchange: Exchange,
        market: MarketType,
        pair: &CurrencyPair,
    ) -> anyhow::Result<OrderBookSnapshot> {
        let path = self.snapshot_path(exchange, market, pair);
        let f = File::open(&path)
            .with_context(|| format!("no snapshot at {}, run scrape first", path.display()))?;
        serde_json::from_reader(f)
            .with_context(|| format!("failed to parse snapshot at {}", path.display()))
    }
}
