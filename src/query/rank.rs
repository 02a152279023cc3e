//! Ranking solutions by accumulated weight
//!
//! Rankings are pure reads. Ties keep insertion order, which for solutions
//! materialized at construction is catalog order.

use super::types::{RankedSolution, RankingMode};
use crate::catalog::Solution;
use crate::graph::ContextGraph;

impl ContextGraph {
    /// Solutions by weight, highest first, filtered per `mode`
    pub fn ranking_with(&self, mode: RankingMode) -> Vec<RankedSolution<'_>> {
        let mut ranking: Vec<RankedSolution<'_>> = self
            .solution_nodes()
            .filter(|n| n.enabled || mode == RankingMode::IncludeDisabled)
            .filter_map(|n| {
                n.subject.as_solution().map(|solution| RankedSolution {
                    solution,
                    weight: n.weight,
                    enabled: n.enabled,
                })
            })
            .collect();
        // sort_by is stable, so equal weights keep insertion order
        ranking.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranking
    }

    /// Every solution by weight, disabled ones included
    pub fn ranking(&self) -> Vec<RankedSolution<'_>> {
        self.ranking_with(RankingMode::IncludeDisabled)
    }

    /// Every solution by weight, highest first. Disabled solutions are
    /// included; use [`ContextGraph::ranked_enabled_solutions`] to drop them.
    pub fn ranked_solutions(&self) -> Vec<&Solution> {
        self.ranking().into_iter().map(|r| r.solution).collect()
    }

    /// Enabled solutions by weight, highest first
    pub fn ranked_enabled_solutions(&self) -> Vec<&Solution> {
        self.ranking_with(RankingMode::ExcludeDisabled)
            .into_iter()
            .map(|r| r.solution)
            .collect()
    }

    /// The heaviest solution, disabled ones included. `None` only when no
    /// solution is materialized.
    pub fn top_solution(&self) -> Option<&Solution> {
        self.ranking().first().map(|r| r.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Characteristic};

    /// Weights 5, 2, 2 on Alpha, Beta, Gamma, declared Gamma, Beta, Alpha
    fn weighted() -> ContextGraph {
        let alpha = Solution::new("Alpha");
        let beta = Solution::new("Beta");
        let gamma = Solution::new("Gamma");
        let mut graph = ContextGraph::new(
            Catalog::new(vec![
                Characteristic::new("A").with_affinity(alpha.clone(), 1.0),
                Characteristic::new("B").with_affinity(beta.clone(), 1.0),
                Characteristic::new("G").with_affinity(gamma.clone(), 1.0),
            ])
            .unwrap(),
            Catalog::new(vec![gamma, beta, alpha]).unwrap(),
        );
        graph.increment("A", 5.0).unwrap();
        graph.increment("B", 2.0).unwrap();
        graph.increment("G", 2.0).unwrap();
        graph
    }

    fn names(solutions: Vec<&Solution>) -> Vec<&str> {
        solutions.into_iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn ties_keep_catalog_order() {
        let graph = weighted();
        assert_eq!(names(graph.ranked_solutions()), vec!["Alpha", "Gamma", "Beta"]);
        assert_eq!(graph.top_solution().unwrap().name, "Alpha");
    }

    #[test]
    fn ranking_reports_weights() {
        let graph = weighted();
        let weights: Vec<f64> = graph.ranking().iter().map(|r| r.weight).collect();
        assert_eq!(weights, vec![5.0, 2.0, 2.0]);
    }

    #[test]
    fn disabled_solutions_stay_in_default_ranking() {
        let mut graph = weighted();
        graph.set_node_enabled(&Solution::new("Alpha"), false).unwrap();

        assert_eq!(graph.top_solution().unwrap().name, "Alpha");
        assert_eq!(names(graph.ranked_solutions()), vec!["Alpha", "Gamma", "Beta"]);
        assert!(!graph.ranking()[0].enabled);
        assert_eq!(names(graph.ranked_enabled_solutions()), vec!["Gamma", "Beta"]);
    }

    #[test]
    fn ranking_does_not_mutate() {
        let graph = weighted();
        let before = graph.to_string();
        let _ = graph.ranked_solutions();
        let _ = graph.top_solution();
        assert_eq!(graph.to_string(), before);
    }

    #[test]
    fn empty_graph_has_no_top_solution() {
        let graph = ContextGraph::new(Catalog::empty(), Catalog::empty());
        assert!(graph.top_solution().is_none());
        assert!(graph.ranked_solutions().is_empty());
    }
}
