//! Diagnostic views of a graph: a text dump and a serializable snapshot

use super::context::{ContextGraph, CENTER};
use super::edge::Edge;
use super::node::{Node, SubjectKind};
use serde::Serialize;
use std::fmt::{self, Write};

fn node_state(node: &Node) -> &'static str {
    if node.enabled {
        "node enabled"
    } else {
        "node disabled"
    }
}

fn edge_state(edge: &Edge) -> &'static str {
    if edge.enabled {
        "edge enabled"
    } else {
        "edge disabled"
    }
}

impl ContextGraph {
    /// `peer, weight, node state : in*multiplier=out, edge state`
    fn write_edge(&self, out: &mut impl Write, peer: &Node, edge: &Edge) -> fmt::Result {
        write!(
            out,
            "{}, {:?}, {} : {:?}*{:?}={:?}, {}",
            peer.name(),
            peer.weight,
            node_state(peer),
            edge.weight_in,
            edge.multiplier,
            edge.weight_out,
            edge_state(edge),
        )
    }

    fn write_node_row<'e>(
        &self,
        out: &mut impl Write,
        node: &Node,
        edges: impl Iterator<Item = &'e Edge>,
        peer_index: impl Fn(&Edge) -> usize,
    ) -> fmt::Result {
        write!(out, "\t[{}, {:?}, {}", node.name(), node.weight, node_state(node))?;
        for edge in edges {
            out.write_str("; ")?;
            self.write_edge(out, &self.nodes[peer_index(edge)], edge)?;
        }
        out.write_str("]\n")
    }
}

/// Center and its edges, then each characteristic with its outgoing edges,
/// then each solution with its incoming edges. Stale edge values are shown as
/// they are.
impl fmt::Display for ContextGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let center = self.center();
        writeln!(
            f,
            "Center node:\t[{}, weight, enabled; characteristicNode, weight, enabled : edgeWeightIn*multiplier=edgeWeightOut, enabled; ...]",
            center.name()
        )?;
        self.write_node_row(f, center, self.outgoing(center.id), |e| e.target.0)?;

        writeln!(
            f,
            "\nCharacteristic nodes:\t[characteristicNode, weight, enabled; solutionNode, weight, enabled : edgeWeightIn*multiplier=edgeWeightOut, enabled; ...]"
        )?;
        for node in self.characteristic_nodes() {
            self.write_node_row(f, node, self.outgoing(node.id), |e| e.target.0)?;
        }

        writeln!(
            f,
            "\nSolution nodes:\t[solutionNode, weight, enabled; characteristicNode, weight, enabled : edgeWeightIn*multiplier=edgeWeightOut, enabled; ...]"
        )?;
        for node in self.solution_nodes() {
            self.write_node_row(f, node, self.incoming(node.id), |e| e.source.0)?;
        }
        Ok(())
    }
}

/// Serializable view of one edge from a node's point of view
#[derive(Debug, Clone, Serialize)]
pub struct EdgeView<'g> {
    /// The node at the other end
    pub peer: &'g str,
    pub multiplier: f64,
    pub weight_in: f64,
    pub weight_out: f64,
    pub enabled: bool,
}

/// Serializable view of a node and the edges shown with it
#[derive(Debug, Clone, Serialize)]
pub struct NodeView<'g> {
    pub name: &'g str,
    pub kind: SubjectKind,
    pub weight: f64,
    pub enabled: bool,
    pub edges: Vec<EdgeView<'g>>,
}

/// Machine-readable counterpart of the text dump
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot<'g> {
    pub center: NodeView<'g>,
    /// Each with its outgoing edges
    pub characteristics: Vec<NodeView<'g>>,
    /// Each with its incoming edges
    pub solutions: Vec<NodeView<'g>>,
}

impl ContextGraph {
    /// Capture the current state for serialization
    pub fn snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            center: self.view(self.center(), self.outgoing(CENTER), |e| e.target.0),
            characteristics: self
                .characteristic_nodes()
                .map(|n| self.view(n, self.outgoing(n.id), |e| e.target.0))
                .collect(),
            solutions: self
                .solution_nodes()
                .map(|n| self.view(n, self.incoming(n.id), |e| e.source.0))
                .collect(),
        }
    }

    fn view<'g>(
        &'g self,
        node: &Node,
        edges: impl Iterator<Item = &'g Edge>,
        peer_index: impl Fn(&Edge) -> usize,
    ) -> NodeView<'g> {
        let node = &self.nodes[node.id.0];
        NodeView {
            name: node.name(),
            kind: node.kind(),
            weight: node.weight,
            enabled: node.enabled,
            edges: edges
                .map(|e| EdgeView {
                    peer: self.nodes[peer_index(e)].name(),
                    multiplier: e.multiplier,
                    weight_in: e.weight_in,
                    weight_out: e.weight_out,
                    enabled: e.enabled,
                })
                .collect(),
        }
    }
}
