//! Module for defining the types which carry an order book from its raw wire
//! shape to an ordered numeric model.
//!
//! Exchange depth endpoints return each side as a list of [price, quantity]
//! pairs with no ordering guarantee and no agreement on whether fields are
//! JSON strings or numbers. [NormalizedBook::from_snapshot] is the single
//! place where tokens are parsed and sides are sorted; everything downstream
//! assumes canonical order and never re-sorts.

use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// The two halves of an order book.
///
/// Each side has a fixed ordering direction: bids by price descending (best
/// bid first), asks by price ascending (best ask first).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Bid,
    Ask,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

/// A price or quantity field exactly as it appears on the wire: the spot API
/// sends strings, the futures API sends numbers.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl RawValue {
    /// Parse to a decimal, `None` when the token is not a finite number.
    fn to_decimal(&self) -> Option<Decimal> {
        match self {
            RawValue::Text(s) => Decimal::from_str(s.trim()).ok(),
            RawValue::Number(n) => Decimal::from_f64(*n),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawValue::Text(s) => write!(f, "{s}"),
            RawValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// The raw snapshot input: unordered, loosely typed, straight off the wire or
/// out of the store.
///
/// Sides are [Option] so that a snapshot missing a side's key entirely stays
/// distinguishable from one with a legitimately empty side.
#[derive(Debug, Deserialize, Serialize)]
pub struct OrderBookSnapshot {
    #[serde(
        rename = "lastUpdateId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bids: Option<Vec<(RawValue, RawValue)>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asks: Option<Vec<(RawValue, RawValue)>>,
}

impl OrderBookSnapshot {
    /// Construct an instance from a type typically available directly when
    /// deserializing an exchange API response.
    pub fn from_asks_bids(
        asks: Vec<(RawValue, RawValue)>,
        bids: Vec<(RawValue, RawValue)>,
    ) -> Self {
        Self {
            last_update_id: None,
            asks: Some(asks),
            bids: Some(bids),
        }
    }
}

/// A single quote. Immutable once constructed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// An order book with both halves parsed and canonically ordered, best price
/// first on each side.
///
/// Owned solely by the pipeline invocation that produced it; nothing is
/// shared or retained across calls.
#[derive(Debug, Eq, PartialEq)]
pub struct NormalizedBook {
    pub asks: Vec<PriceLevel>,
    pub bids: Vec<PriceLevel>,
}

impl NormalizedBook {
    /// Parse and order a raw snapshot. All-or-nothing: a missing side or an
    /// unparseable token fails the whole call.
    ///
    /// An empty side collection is valid and yields an empty sequence; a
    /// book may be legitimately one-sided.
    pub fn from_snapshot(snapshot: &OrderBookSnapshot) -> Result<Self, AnalysisError> {
        let asks = parse_side(Side::Ask, snapshot.asks.as_deref())?;
        let bids = parse_side(Side::Bid, snapshot.bids.as_deref())?;
        Ok(Self { asks, bids })
    }
}

/// Parse one side's raw pairs and sort them into the side's canonical order.
/// The sort is stable, so levels sharing a price keep their input order.
fn parse_side(
    side: Side,
    raw: Option<&[(RawValue, RawValue)]>,
) -> Result<Vec<PriceLevel>, AnalysisError> {
    let raw = raw.ok_or(AnalysisError::MissingSide { side })?;
    let mut levels = Vec::with_capacity(raw.len());
    for (index, (price, quantity)) in raw.iter().enumerate() {
        let price = price
            .to_decimal()
            .ok_or_else(|| AnalysisError::MalformedLevel {
                side,
                index,
                field: "price",
                token: price.to_string(),
            })?;
        let quantity = quantity
            .to_decimal()
            .ok_or_else(|| AnalysisError::MalformedLevel {
                side,
                index,
                field: "quantity",
                token: quantity.to_string(),
            })?;
        levels.push(PriceLevel { price, quantity });
    }
    match side {
        Side::Ask => levels.sort_by(|a, b| a.price.cmp(&b.price)),
        Side::Bid => levels.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_owned())
    }

    fn level(price: Decimal, quantity: Decimal) -> PriceLevel {
        PriceLevel { price, quantity }
    }

    #[test]
    fn normalize_sorts_each_side() {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            vec![
                (text("105"), text("3")),
                (text("103"), text("1")),
                (text("104"), text("4")),
            ],
            vec![
                (text("100"), text("2")),
                (text("101"), text("1")),
                (text("99"), text("5")),
            ],
        );
        let book = NormalizedBook::from_snapshot(&snapshot).unwrap();
        assert_eq!(
            book.asks,
            vec![
                level(dec!(103), dec!(1)),
                level(dec!(104), dec!(4)),
                level(dec!(105), dec!(3)),
            ]
        );
        assert_eq!(
            book.bids,
            vec![
                level(dec!(101), dec!(1)),
                level(dec!(100), dec!(2)),
                level(dec!(99), dec!(5)),
            ]
        );
    }

    #[test]
    fn equal_prices_keep_input_order() {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            vec![],
            vec![
                (text("100"), text("7")),
                (text("100"), text("2")),
                (text("101"), text("1")),
                (text("100"), text("4")),
            ],
        );
        let book = NormalizedBook::from_snapshot(&snapshot).unwrap();
        assert_eq!(
            book.bids,
            vec![
                level(dec!(101), dec!(1)),
                level(dec!(100), dec!(7)),
                level(dec!(100), dec!(2)),
                level(dec!(100), dec!(4)),
            ]
        );
    }

    #[test]
    fn numeric_tokens_parse() {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            vec![(RawValue::Number(104.5), RawValue::Number(4.0))],
            vec![(RawValue::Number(100.0), RawValue::Number(2.5))],
        );
        let book = NormalizedBook::from_snapshot(&snapshot).unwrap();
        assert_eq!(book.asks, vec![level(dec!(104.5), dec!(4))]);
        assert_eq!(book.bids, vec![level(dec!(100), dec!(2.5))]);
    }

    #[test]
    fn missing_side_is_an_error() {
        let snapshot: OrderBookSnapshot =
            serde_json::from_str(r#"{"bids": [["100", "2"]]}"#).unwrap();
        assert_eq!(
            NormalizedBook::from_snapshot(&snapshot),
            Err(AnalysisError::MissingSide { side: Side::Ask })
        );
    }

    #[test]
    fn empty_side_is_not_an_error() {
        let snapshot: OrderBookSnapshot =
            serde_json::from_str(r#"{"bids": [], "asks": [["50", "1"]]}"#).unwrap();
        let book = NormalizedBook::from_snapshot(&snapshot).unwrap();
        assert!(book.bids.is_empty());
        assert_eq!(book.asks, vec![level(dec!(50), dec!(1))]);
    }

    #[test]
    fn malformed_token_names_side_and_index() {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            vec![(text("105"), text("3"))],
            vec![(text("100"), text("2")), (text("101"), text("N/A"))],
        );
        assert_eq!(
            NormalizedBook::from_snapshot(&snapshot),
            Err(AnalysisError::MalformedLevel {
                side: Side::Bid,
                index: 1,
                field: "quantity",
                token: "N/A".to_owned(),
            })
        );
    }

    #[test]
    fn non_finite_number_is_malformed() {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            vec![(RawValue::Number(f64::NAN), RawValue::Number(1.0))],
            vec![],
        );
        assert!(matches!(
            NormalizedBook::from_snapshot(&snapshot),
            Err(AnalysisError::MalformedLevel {
                side: Side::Ask,
                index: 0,
                field: "price",
                ..
            })
        ));
    }
}
