//! Increment propagation from characteristics to solutions

use super::context::{reject, ContextGraph, CENTER};
use super::edge::EdgeId;
use super::error::{GraphError, GraphResult};
use super::node::{NodeId, NodeKey};
use crate::catalog::Named;
use tracing::trace;

/// Amount applied by [`ContextGraph::observe`]
pub const DEFAULT_INCREMENT: f64 = 1.0;

/// What a single increment touched
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    /// The incremented characteristic's node
    pub characteristic: NodeId,
    /// Amount added to the characteristic and the center
    pub amount: f64,
    /// Characteristic weight after the increment
    pub weight: f64,
    /// Edges that fired, in creation order
    pub fired: Vec<EdgeId>,
    /// Edges skipped because the characteristic, the edge or its target was
    /// disabled. Their `weight_in`/`weight_out` keep their previous values.
    pub suppressed: Vec<EdgeId>,
}

impl ContextGraph {
    /// Record that a characteristic was observed `amount` times.
    ///
    /// The characteristic and the center accumulate `amount` whether or not
    /// the characteristic is enabled. If it is enabled, every enabled outgoing
    /// edge with an enabled target fires with the new weight, and the target
    /// is credited with the growth of that edge's `weight_out`.
    ///
    /// Returns `NotFound` and changes nothing if the characteristic is not
    /// materialized, and `InvalidAmount` if `amount` is NaN or infinite.
    pub fn increment(
        &mut self,
        characteristic: &(impl Named + ?Sized),
        amount: f64,
    ) -> GraphResult<Propagation> {
        if !amount.is_finite() {
            return reject(GraphError::InvalidAmount(amount));
        }
        let id = match self.require(NodeKey::Characteristic(characteristic.name())) {
            Ok(id) => id,
            Err(err) => return reject(err),
        };

        self.nodes[id.0].add_weight(amount);
        self.nodes[CENTER.0].add_weight(amount);

        let weight = self.nodes[id.0].weight;
        let forwarding = self.nodes[id.0].enabled;
        let mut fired = Vec::new();
        let mut suppressed = Vec::new();

        for edge_id in self.nodes[id.0].outgoing.clone() {
            let edge = &self.edges[edge_id.0];
            let target = edge.target;
            if !forwarding || !edge.enabled || !self.nodes[target.0].enabled {
                suppressed.push(edge_id);
                continue;
            }
            let growth = self.edges[edge_id.0].fire(weight);
            self.nodes[target.0].add_weight(growth);
            fired.push(edge_id);
        }

        trace!(
            characteristic = characteristic.name(),
            amount,
            weight,
            fired = fired.len(),
            suppressed = suppressed.len(),
            "incremented"
        );

        Ok(Propagation {
            characteristic: id,
            amount,
            weight,
            fired,
            suppressed,
        })
    }

    /// Increment by [`DEFAULT_INCREMENT`]
    pub fn observe(&mut self, characteristic: &(impl Named + ?Sized)) -> GraphResult<Propagation> {
        self.increment(characteristic, DEFAULT_INCREMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Characteristic, Solution};

    fn graph() -> ContextGraph {
        let therapy = Solution::new("Therapy");
        let exercise = Solution::new("Exercise");
        ContextGraph::new(
            Catalog::new(vec![Characteristic::new("Anxiety")
                .with_affinity(therapy.clone(), 2.0)
                .with_affinity(exercise.clone(), 1.0)])
            .unwrap(),
            Catalog::new(vec![exercise, therapy]).unwrap(),
        )
    }

    #[test]
    fn increment_credits_characteristic_center_and_solutions() {
        let mut graph = graph();
        let p = graph.increment("Anxiety", 3.0).unwrap();

        assert_eq!(p.weight, 3.0);
        assert_eq!(p.fired.len(), 2);
        assert!(p.suppressed.is_empty());
        assert_eq!(graph.center().weight, 3.0);
        assert_eq!(graph.solution_node("Therapy").unwrap().weight, 6.0);
        assert_eq!(graph.solution_node("Exercise").unwrap().weight, 3.0);
    }

    #[test]
    fn edges_record_source_weight_after_increment() {
        let mut graph = graph();
        graph.increment("Anxiety", 3.0).unwrap();
        graph.increment("Anxiety", 1.0).unwrap();

        let anxiety = graph.node_id(NodeKey::Characteristic("Anxiety")).unwrap();
        let therapy = graph.node_id(NodeKey::Solution("Therapy")).unwrap();
        let edge = graph.edge_between(anxiety, therapy).unwrap();
        assert_eq!(edge.weight_in, 4.0);
        assert_eq!(edge.weight_out, 8.0);
        assert_eq!(graph.solution_node("Therapy").unwrap().weight, 8.0);
    }

    #[test]
    fn unknown_characteristic_changes_nothing() {
        let mut graph = graph();
        let err = graph.increment("Euphoria", 1.0).unwrap_err();
        assert!(matches!(err, GraphError::NotFound { .. }));
        assert_eq!(graph.center().weight, 0.0);
        assert!(graph.solution_nodes().all(|n| n.weight == 0.0));
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        let mut graph = graph();
        graph.increment("Anxiety", 1.0).unwrap();
        let before = graph.to_string();

        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = graph.increment("Anxiety", amount).unwrap_err();
            assert!(matches!(err, GraphError::InvalidAmount(_)));
        }
        assert_eq!(graph.center().weight, 1.0);
        assert_eq!(graph.to_string(), before);
    }

    #[test]
    fn observe_uses_default_amount() {
        let mut graph = graph();
        graph.observe("Anxiety").unwrap();
        assert_eq!(graph.weight(NodeKey::Characteristic("Anxiety")), Some(DEFAULT_INCREMENT));
    }
}
