//! Ranking types

use crate::catalog::Solution;
use serde::{Deserialize, Serialize};

/// Whether disabled solutions take part in a ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    /// Disabled solutions keep their place; callers filter if they want to
    #[default]
    IncludeDisabled,
    /// Disabled solutions are left out
    ExcludeDisabled,
}

/// One entry of a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSolution<'g> {
    pub solution: &'g Solution,
    pub weight: f64,
    pub enabled: bool,
}
