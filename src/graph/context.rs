//! ContextGraph: the recommendation graph for one conversation
//!
//! A single center node fans out to every characteristic node, and each
//! characteristic fans out to the solutions it declares an affinity for.

use super::edge::{Edge, EdgeId};
use super::error::{GraphError, GraphResult};
use super::node::{Node, NodeId, NodeKey, Subject, SubjectKind};
use crate::catalog::{Catalog, Characteristic, Named, Solution};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The center node is always the first node created
pub(crate) const CENTER: NodeId = NodeId(0);

/// Outcome of [`ContextGraph::add_solution`]
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionWiring {
    /// The solution's node
    pub node: NodeId,
    /// Whether the node was created by this call
    pub created: bool,
    /// Edges created by this call
    pub edges: Vec<EdgeId>,
    /// Characteristics that were not connected, with reasons
    pub rejections: Vec<GraphError>,
}

/// Weighted graph linking observed characteristics to candidate solutions
///
/// Owns every node and edge. Nodes are never removed; they are disabled.
#[derive(Debug, Clone)]
pub struct ContextGraph {
    pub(super) characteristics: Arc<Catalog<Characteristic>>,
    pub(super) solutions: Arc<Catalog<Solution>>,
    /// All nodes, center first, in creation order
    pub(super) nodes: Vec<Node>,
    /// All edges in creation order
    pub(super) edges: Vec<Edge>,
    pub(super) characteristic_index: HashMap<String, NodeId>,
    pub(super) solution_index: HashMap<String, NodeId>,
    /// Materialized characteristic nodes in insertion order
    pub(super) characteristic_nodes: Vec<NodeId>,
    /// Materialized solution nodes in insertion order
    pub(super) solution_nodes: Vec<NodeId>,
    /// (source, target) -> edge
    pub(super) edge_index: HashMap<(NodeId, NodeId), EdgeId>,
}

impl ContextGraph {
    /// Build the graph from both catalogs.
    ///
    /// Solutions are materialized first, in catalog order, then each
    /// characteristic is added and wired to its declared solutions.
    pub fn new(characteristics: Catalog<Characteristic>, solutions: Catalog<Solution>) -> Self {
        Self::from_shared(Arc::new(characteristics), Arc::new(solutions))
    }

    /// Build the graph from catalogs shared with other graphs
    pub fn from_shared(
        characteristics: Arc<Catalog<Characteristic>>,
        solutions: Arc<Catalog<Solution>>,
    ) -> Self {
        let mut graph = Self {
            characteristics: Arc::clone(&characteristics),
            solutions: Arc::clone(&solutions),
            nodes: vec![Node::new(CENTER, Subject::Center)],
            edges: Vec::new(),
            characteristic_index: HashMap::new(),
            solution_index: HashMap::new(),
            characteristic_nodes: Vec::new(),
            solution_nodes: Vec::new(),
            edge_index: HashMap::new(),
        };

        for solution in solutions.iter() {
            // Rejections are logged by the callee
            let _ = graph.materialize_solution(solution);
        }
        for characteristic in characteristics.iter() {
            let _ = graph.add_characteristic(characteristic);
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built context graph"
        );
        graph
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Add a cataloged characteristic, connect it to the center, and wire it
    /// to every solution it declares an affinity for.
    ///
    /// The catalog entry is authoritative: affinities come from the catalog,
    /// not from `characteristic`.
    pub fn add_characteristic(
        &mut self,
        characteristic: &(impl Named + ?Sized),
    ) -> GraphResult<NodeId> {
        let name = characteristic.name();
        if self.characteristic_index.contains_key(name) {
            return reject(GraphError::AlreadyPresent {
                kind: SubjectKind::Characteristic,
                name: name.to_string(),
            });
        }
        let Some(entry) = self.characteristics.get(name).cloned() else {
            return reject(GraphError::NotInCatalog {
                kind: SubjectKind::Characteristic,
                name: name.to_string(),
            });
        };

        let affinities = entry.affinities.clone();
        let node = self.push_node(Subject::Characteristic(entry));
        self.characteristic_index.insert(name.to_string(), node);
        self.characteristic_nodes.push(node);
        self.connect(CENTER, node, 1.0);

        for affinity in &affinities {
            let target = match self.solution_index.get(affinity.solution.name()) {
                Some(&id) => id,
                None => match self.materialize_solution(&affinity.solution) {
                    Ok(id) => id,
                    Err(_) => continue,
                },
            };
            if !self.are_connected(node, target) {
                self.connect(node, target, affinity.multiplier);
            }
        }
        Ok(node)
    }

    /// Materialize a solution if needed and connect it to each given
    /// characteristic node, using the multiplier that characteristic declares.
    ///
    /// Characteristics that are not in the graph, declare no affinity, or are
    /// already connected are reported in `rejections` and skipped.
    pub fn add_solution<'k, K>(
        &mut self,
        solution: &(impl Named + ?Sized),
        characteristics: impl IntoIterator<Item = &'k K>,
    ) -> GraphResult<SolutionWiring>
    where
        K: Named + ?Sized + 'k,
    {
        let name = solution.name();
        let (node, created) = match self.solution_index.get(name) {
            Some(&id) => (id, false),
            None => (self.materialize_solution(solution)?, true),
        };

        let mut wiring = SolutionWiring {
            node,
            created,
            edges: Vec::new(),
            rejections: Vec::new(),
        };

        for characteristic in characteristics {
            let ch_name = characteristic.name();
            let Some(&ch_node) = self.characteristic_index.get(ch_name) else {
                wiring
                    .rejections
                    .push(GraphError::not_found(SubjectKind::Characteristic, ch_name));
                continue;
            };
            let multiplier = self.nodes[ch_node.0]
                .subject
                .as_characteristic()
                .and_then(|ch| ch.multiplier_for(name));
            let Some(multiplier) = multiplier else {
                wiring.rejections.push(GraphError::NoAffinity {
                    characteristic: ch_name.to_string(),
                    solution: name.to_string(),
                });
                continue;
            };
            if self.are_connected(ch_node, node) {
                wiring.rejections.push(GraphError::AlreadyConnected {
                    characteristic: ch_name.to_string(),
                    solution: name.to_string(),
                });
                continue;
            }
            wiring.edges.push(self.connect(ch_node, node, multiplier));
        }

        for rejection in &wiring.rejections {
            debug!(%rejection, "solution wiring skipped");
        }
        Ok(wiring)
    }

    /// Create a solution node, if the solution is cataloged and not yet present
    fn materialize_solution(&mut self, solution: &(impl Named + ?Sized)) -> GraphResult<NodeId> {
        let name = solution.name();
        if self.solution_index.contains_key(name) {
            return reject(GraphError::AlreadyPresent {
                kind: SubjectKind::Solution,
                name: name.to_string(),
            });
        }
        let Some(entry) = self.solutions.get(name).cloned() else {
            return reject(GraphError::NotInCatalog {
                kind: SubjectKind::Solution,
                name: name.to_string(),
            });
        };

        let node = self.push_node(Subject::Solution(entry));
        self.solution_index.insert(name.to_string(), node);
        self.solution_nodes.push(node);
        Ok(node)
    }

    fn push_node(&mut self, subject: Subject) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, subject));
        id
    }

    /// Create a directed edge and register it on both endpoints
    fn connect(&mut self, source: NodeId, target: NodeId, multiplier: f64) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(id, source, target, multiplier));
        self.nodes[source.0].outgoing.push(id);
        self.nodes[target.0].incoming.push(id);
        self.edge_index.insert((source, target), id);
        id
    }

    // ---------------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------------

    /// True if an edge exists between `a` and `b` in either direction,
    /// enabled or not
    pub fn are_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.edge_index.contains_key(&(a, b)) || self.edge_index.contains_key(&(b, a))
    }

    /// Resolve a key to the node it names, if materialized
    pub fn node_id<'a>(&self, key: impl Into<NodeKey<'a>>) -> Option<NodeId> {
        match key.into() {
            NodeKey::Center => Some(CENTER),
            NodeKey::Characteristic(name) => self.characteristic_index.get(name).copied(),
            NodeKey::Solution(name) => self.solution_index.get(name).copied(),
        }
    }

    /// Resolve a key, reporting `NotFound` when absent
    pub(crate) fn require<'a>(&self, key: impl Into<NodeKey<'a>>) -> GraphResult<NodeId> {
        let key = key.into();
        self.node_id(key)
            .ok_or_else(|| GraphError::not_found(key.kind(), key.name()))
    }

    /// Look up a node by key
    pub fn get<'a>(&self, key: impl Into<NodeKey<'a>>) -> Option<&Node> {
        self.node_id(key).map(move |id| &self.nodes[id.0])
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get an edge by ID
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// The edge from `source` to `target`, if any
    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.edge_index.get(&(source, target)).map(|id| &self.edges[id.0])
    }

    /// The center node
    pub fn center(&self) -> &Node {
        &self.nodes[CENTER.0]
    }

    /// Node for a characteristic, by name
    pub fn characteristic_node(&self, name: &str) -> Option<&Node> {
        self.get(NodeKey::Characteristic(name))
    }

    /// Node for a solution, by name
    pub fn solution_node(&self, name: &str) -> Option<&Node> {
        self.get(NodeKey::Solution(name))
    }

    /// Current weight of a node
    pub fn weight<'a>(&self, key: impl Into<NodeKey<'a>>) -> Option<f64> {
        self.get(key).map(|n| n.weight)
    }

    /// Characteristic nodes in insertion order
    pub fn characteristic_nodes(&self) -> impl Iterator<Item = &Node> {
        self.characteristic_nodes.iter().map(move |id| &self.nodes[id.0])
    }

    /// Solution nodes in insertion order
    pub fn solution_nodes(&self) -> impl Iterator<Item = &Node> {
        self.solution_nodes.iter().map(move |id| &self.nodes[id.0])
    }

    /// Outgoing edges of a node, in creation order
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(move |n| n.outgoing.iter().map(move |e| &self.edges[e.0]))
    }

    /// Incoming edges of a node, in creation order
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(move |n| n.incoming.iter().map(move |e| &self.edges[e.0]))
    }

    /// All edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Characteristic catalog this graph was built from
    pub fn characteristics(&self) -> &Catalog<Characteristic> {
        &self.characteristics
    }

    /// Solution catalog this graph was built from
    pub fn solutions(&self) -> &Catalog<Solution> {
        &self.solutions
    }

    /// Number of nodes, center included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Log a rejected operation and return it
pub(super) fn reject<T>(err: GraphError) -> GraphResult<T> {
    debug!(rejection = %err, "graph operation skipped");
    Err(err)
}
