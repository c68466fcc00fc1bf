//! Types and functions for parsing and validating configuration from a YAML file.

use std::path::PathBuf;

use anyhow::bail;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::utils::{deserialize_using_parse, Seconds};

/// The supported exchanges.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all(deserialize = "lowercase"))]
pub enum Exchange {
    Mexc,
}
use Exchange::*;

impl Default for Exchange {
    fn default() -> Self {
        Self::Mexc
    }
}

impl From<&Exchange> for String {
    fn from(value: &Exchange) -> Self {
        match &value {
            Mexc => "mexc".into(),
        }
    }
}

impl std::str::FromStr for Exchange {
    type Err = anyhow::Error;
    fn from_str(exchange: &str) -> Result<Self, Self::Err> {
        match exchange.trim().to_lowercase().as_ref() {
            "mexc" => Ok(Mexc),
            _ => bail!("exchange not implemented: {exchange}"),
        }
    }
}

/// Which of the venue's markets a snapshot is taken from. The two markets
/// have separate REST APIs with different payload conventions.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all(deserialize = "lowercase"))]
pub enum MarketType {
    Spot,
    Futures,
}

impl Default for MarketType {
    fn default() -> Self {
        Self::Spot
    }
}

impl From<&MarketType> for String {
    fn from(value: &MarketType) -> Self {
        match &value {
            MarketType::Spot => "spot".into(),
            MarketType::Futures => "futures".into(),
        }
    }
}

impl std::str::FromStr for MarketType {
    type Err = anyhow::Error;
    fn from_str(market: &str) -> Result<Self, Self::Err> {
        match market.trim().to_lowercase().as_ref() {
            "spot" => Ok(MarketType::Spot),
            "futures" => Ok(MarketType::Futures),
            _ => bail!("market type not implemented: {market}"),
        }
    }
}

static PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]{2,10}_[a-z0-9]{2,10}$").unwrap());

/// Currency pair for reasoning about how the venue presents symbols at
/// various places in its API.
/// The spot API wants "BTCUSDT" while the futures API wants "BTC_USDT"; we
/// use lowercase "btc_usdt" internally and the type enforces this.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl Default for CurrencyPair {
    fn default() -> Self {
        Self {
            base: "btc".to_owned(),
            quote: "usdt".to_owned(),
        }
    }
}

impl CurrencyPair {
    pub fn base(&self) -> &str {
        self.base.as_str()
    }
    pub fn quote(&self) -> &str {
        self.quote.as_str()
    }

    /// The symbol as the given market's API expects it, e.g. "BTCUSDT" on
    /// spot and "BTC_USDT" on futures.
    pub fn symbol_for(&self, market: MarketType) -> String {
        let parts = [self.base.to_uppercase(), self.quote.to_uppercase()];
        match market {
            MarketType::Spot => parts.join(""),
            MarketType::Futures => parts.join("_"),
        }
    }
}

impl std::str::FromStr for CurrencyPair {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !PAIR_RE.is_match(s) {
            bail!("invalid currency_pair format: {s}");
        }
        let mut assets = s.splitn(2, '_');
        Ok(Self {
            // unwraps never panic due to regex check
            base: assets.next().unwrap().to_owned(),
            quote: assets.next().unwrap().to_owned(),
        })
    }
}

/// A target structure for deserializing the YAML config file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub exchange: Exchange,
    pub market: MarketType,
    #[serde(deserialize_with = "deserialize_using_parse")]
    pub currency_pair: CurrencyPair,
    pub depth: usize,
    pub limit: usize,
    pub data_dir: PathBuf,
    pub spot_api_url: String,
    pub futures_api_url: String,
    pub request_timeout_secs: Seconds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exchange: Mexc,
            market: MarketType::Spot,
            currency_pair: "btc_usdt".parse().unwrap(),
            depth: 10,
            limit: 100,
            data_dir: "data".into(),
            spot_api_url: "https://api.mexc.com/api/v3".to_owned(),
            futures_api_url: "https://contract.mexc.com/api/v1/contract".to_owned(),
            request_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Validate the configuration.
    fn validate(self) -> anyhow::Result<Self> {
        if self.depth < 1 {
            bail!("depth must be greater than 0")
        } else if self.depth > self.limit {
            bail!("depth exceeds the snapshot request limit")
        }
        if self.limit > 5000 {
            bail!("limit too large, the venue caps depth snapshots at 5000")
        }
        for base_url in [&self.spot_api_url, &self.futures_api_url] {
            url::Url::parse(base_url)?;
        }
        Ok(self)
    }
}

/// Parse the config file and validate it.
///
/// # Panics
/// Will panic on invalid config, for example an unsupported exchange,
/// invalid currency_pair formatting or a depth larger than the request limit.
pub fn read_config() -> Config {
    let config_path = env!("CARGO_MANIFEST_DIR");
    let f = std::fs::File::open(format!("{config_path}/config.yml"))
        .expect("failed to open config file");
    let config: Config = serde_yaml::from_reader(f).expect("failed to parse config file");
    config.validate().expect("invalid config")
}
