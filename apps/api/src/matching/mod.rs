//! The matching core: cosine similarity plus top-N ranking.
//!
//! Everything in here is pure computation over caller-supplied records —
//! no I/O, no shared state, safe to call from any number of handlers at
//! once.

pub mod analysis;
pub mod handlers;
pub mod ranker;
pub mod similarity;

pub use analysis::{analyze_pair, MatchAnalysis};
pub use ranker::{find_top_matches, MatchParams, ScoredMatch};
pub use similarity::cosine_similarity;

use thiserror::Error;

/// Errors raised by the matching core.
///
/// Only `MissingEmbedding` on the query ever aborts a ranking call; the
/// per-vector variants are swallowed at the per-candidate level (the
/// offending record is skipped and the batch continues).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("query record has no embedding")]
    MissingEmbedding,

    #[error("embedding is empty")]
    EmptyVector,

    #[error("embedding dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("embedding has zero magnitude")]
    ZeroNormVector,

    #[error("embedding element is not numeric: {0}")]
    NonNumericElement(String),
}
