//! Edge representation with multiplier-scaled propagation

use super::node::NodeId;
use serde::Serialize;

/// Index of an edge within its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A directed edge carrying a scaled contribution from source to target
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Fixed at creation; 1 for center edges
    pub multiplier: f64,
    /// Source weight seen the last time this edge fired
    pub weight_in: f64,
    /// `weight_in * multiplier`
    pub weight_out: f64,
    /// Disabled edges transmit nothing
    pub enabled: bool,
}

impl Edge {
    pub(crate) fn new(id: EdgeId, source: NodeId, target: NodeId, multiplier: f64) -> Self {
        Self {
            id,
            source,
            target,
            multiplier,
            weight_in: 0.0,
            weight_out: 0.0,
            enabled: true,
        }
    }

    /// Record the source weight and return how much `weight_out` grew.
    ///
    /// The target is credited with the growth, so a target's weight is the sum
    /// of its incoming edges' `weight_out`. An edge that was skipped while its
    /// source kept accumulating catches up the next time it fires.
    pub(crate) fn fire(&mut self, source_weight: f64) -> f64 {
        let previous = self.weight_out;
        self.weight_in = source_weight;
        self.weight_out = self.weight_in * self.multiplier;
        self.weight_out - previous
    }
}
