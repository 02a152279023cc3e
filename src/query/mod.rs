//! Ranking queries over a context graph
//!
//! Solutions are ordered by the weight they accumulated through propagation.

mod rank;
mod types;

pub use types::{RankedSolution, RankingMode};
