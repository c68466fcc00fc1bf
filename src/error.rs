//! Typed failures surfaced by the analysis core.
//!
//! Callers decide presentation; nothing here writes to a console. Empty
//! sides are valid data and deliberately have no variant.

use thiserror::Error;

use crate::orderbook::Side;

/// Failures produced while normalizing or analyzing a snapshot.
///
/// Normalization is all-or-nothing: on any of these, no partial book or
/// partial result is handed back.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// The snapshot carries no collection at all for one side of the book,
    /// as opposed to an empty one.
    #[error("snapshot has no {side} collection")]
    MissingSide { side: Side },

    /// A price or quantity token could not be parsed as a number. The index
    /// refers to the level's position in the raw input, before ordering.
    #[error("unparseable {field} token {token:?} at {side} level {index}")]
    MalformedLevel {
        side: Side,
        index: usize,
        field: &'static str,
        token: String,
    },

    /// A requested depth of zero has no meaningful top-of-book result.
    #[error("depth must be greater than 0")]
    InvalidDepth,
}
