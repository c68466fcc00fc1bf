//! The depth analysis engine: top-N extraction, cumulative depth curves and
//! wall detection over a normalized book.
//!
//! Everything here is a pure function over immutable inputs. Levels are
//! assumed to be in their side's canonical order, which
//! [NormalizedBook::from_snapshot](crate::orderbook::NormalizedBook::from_snapshot)
//! established; truncation preserves it.

use rust_decimal::Decimal;

use crate::error::AnalysisError;
use crate::orderbook::{NormalizedBook, PriceLevel};

/// One side's analysis artifact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SideAnalysis {
    /// The considered levels in canonical order, at most the requested depth.
    pub levels: Vec<PriceLevel>,
    /// `cumulative[i]` is the total quantity of `levels[0..=i]`: how much can
    /// be filled without moving the price past level `i`.
    pub cumulative: Vec<Decimal>,
    /// The level with the largest quantity among the considered levels, or
    /// `None` for an empty side.
    pub wall: Option<PriceLevel>,
}

impl SideAnalysis {
    /// Aggregate one side's levels, already in canonical order.
    pub fn from_levels(levels: Vec<PriceLevel>) -> Self {
        let mut cumulative = Vec::with_capacity(levels.len());
        let mut running = Decimal::ZERO;
        for level in &levels {
            running += level.quantity;
            cumulative.push(running);
        }
        // strictly-greater replacement keeps the first of equally sized
        // walls, the one nearest the best price
        let wall = levels
            .iter()
            .copied()
            .reduce(|wall, level| if level.quantity > wall.quantity { level } else { wall });
        Self {
            levels,
            cumulative,
            wall,
        }
    }
}

/// The full analysis artifact handed to display or charting consumers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalysisResult {
    pub bids: SideAnalysis,
    pub asks: SideAnalysis,
}

impl AnalysisResult {
    /// Best ask price minus best bid price, when both sides are populated.
    pub fn spread(&self) -> Option<Decimal> {
        let best_ask = self.asks.levels.first()?;
        let best_bid = self.bids.levels.first()?;
        Some(best_ask.price - best_bid.price)
    }
}

/// Analyze the top `depth` levels of each side of a normalized book.
///
/// A side with fewer than `depth` levels contributes all of its levels, with
/// no padding. `depth` of zero is a caller error.
pub fn analyze(book: &NormalizedBook, depth: usize) -> Result<AnalysisResult, AnalysisError> {
    if depth == 0 {
        return Err(AnalysisError::InvalidDepth);
    }
    Ok(AnalysisResult {
        bids: SideAnalysis::from_levels(top_levels(&book.bids, depth)),
        asks: SideAnalysis::from_levels(top_levels(&book.asks, depth)),
    })
}

fn top_levels(levels: &[PriceLevel], depth: usize) -> Vec<PriceLevel> {
    levels.iter().take(depth).copied().collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::orderbook::{OrderBookSnapshot, RawValue};

    fn text(s: &str) -> RawValue {
        RawValue::Text(s.to_owned())
    }

    fn level(price: Decimal, quantity: Decimal) -> PriceLevel {
        PriceLevel { price, quantity }
    }

    fn book(
        asks: Vec<(&'static str, &'static str)>,
        bids: Vec<(&'static str, &'static str)>,
    ) -> NormalizedBook {
        let snapshot = OrderBookSnapshot::from_asks_bids(
            asks.into_iter().map(|(p, q)| (text(p), text(q))).collect(),
            bids.into_iter().map(|(p, q)| (text(p), text(q))).collect(),
        );
        NormalizedBook::from_snapshot(&snapshot).unwrap()
    }

    #[test]
    fn top_bids_with_cumulative_and_wall() {
        let book = book(vec![], vec![("100", "2"), ("101", "1"), ("99", "5")]);
        let result = analyze(&book, 2).unwrap();
        assert_eq!(
            result.bids.levels,
            vec![level(dec!(101), dec!(1)), level(dec!(100), dec!(2))]
        );
        assert_eq!(result.bids.cumulative, vec![dec!(1), dec!(3)]);
        assert_eq!(result.bids.wall, Some(level(dec!(100), dec!(2))));
    }

    #[test]
    fn depth_beyond_available_returns_all() {
        let book = book(vec![("105", "3"), ("104", "4")], vec![]);
        let result = analyze(&book, 10).unwrap();
        assert_eq!(
            result.asks.levels,
            vec![level(dec!(104), dec!(4)), level(dec!(105), dec!(3))]
        );
        assert_eq!(result.asks.cumulative, vec![dec!(4), dec!(7)]);
        assert_eq!(result.asks.wall, Some(level(dec!(104), dec!(4))));
    }

    #[test]
    fn zero_depth_is_an_error() {
        let book = book(vec![("105", "3")], vec![("100", "2")]);
        assert_eq!(analyze(&book, 0), Err(AnalysisError::InvalidDepth));
    }

    #[test]
    fn wall_tie_goes_to_level_nearest_best_price() {
        let book = book(vec![], vec![("100", "5"), ("101", "5"), ("99", "1")]);
        let result = analyze(&book, 10).unwrap();
        assert_eq!(result.bids.wall, Some(level(dec!(101), dec!(5))));
    }

    #[test]
    fn empty_side_yields_empty_analysis() {
        let book = book(vec![("50", "1")], vec![]);
        let result = analyze(&book, 5).unwrap();
        assert!(result.bids.levels.is_empty());
        assert!(result.bids.cumulative.is_empty());
        assert_eq!(result.bids.wall, None);
        assert_eq!(result.asks.levels, vec![level(dec!(50), dec!(1))]);
        assert_eq!(result.asks.cumulative, vec![dec!(1)]);
        assert_eq!(result.asks.wall, Some(level(dec!(50), dec!(1))));
    }

    #[test]
    fn cumulative_is_exact_and_totals_the_side() {
        let book = book(
            vec![],
            vec![("100", "0.1"), ("99", "0.2"), ("98", "0.3"), ("97", "0.4")],
        );
        let result = analyze(&book, 3).unwrap();
        assert_eq!(
            result.bids.cumulative,
            vec![dec!(0.1), dec!(0.3), dec!(0.6)]
        );
        // only the considered levels count towards the total
        assert_eq!(*result.bids.cumulative.last().unwrap(), dec!(0.6));
    }

    #[test]
    fn wall_considers_truncated_levels_only() {
        let book = book(vec![], vec![("100", "2"), ("99", "1"), ("98", "50")]);
        let result = analyze(&book, 2).unwrap();
        assert_eq!(result.bids.wall, Some(level(dec!(100), dec!(2))));
    }

    #[test]
    fn spread_requires_both_sides() {
        let two_sided = book(vec![("104", "4")], vec![("101", "1")]);
        assert_eq!(analyze(&two_sided, 5).unwrap().spread(), Some(dec!(3)));

        let one_sided = book(vec![("104", "4")], vec![]);
        assert_eq!(analyze(&one_sided, 5).unwrap().spread(), None);
    }
}
