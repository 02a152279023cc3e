//! Enable/disable gating for nodes and edges

use super::context::{reject, ContextGraph};
use super::edge::EdgeId;
use super::error::{GraphError, GraphResult};
use super::node::{NodeKey, SubjectKind};
use crate::catalog::Named;

impl ContextGraph {
    /// Enable or disable a node. Its weight is untouched.
    pub fn set_node_enabled<'a>(
        &mut self,
        key: impl Into<NodeKey<'a>>,
        enabled: bool,
    ) -> GraphResult<()> {
        let id = match self.require(key) {
            Ok(id) => id,
            Err(err) => return reject(err),
        };
        self.nodes[id.0].enabled = enabled;
        Ok(())
    }

    pub fn is_node_enabled<'a>(&self, key: impl Into<NodeKey<'a>>) -> GraphResult<bool> {
        let id = self.require(key)?;
        Ok(self.nodes[id.0].enabled)
    }

    /// Enable or disable the edge from `characteristic` to `solution`
    pub fn set_edge_enabled(
        &mut self,
        characteristic: &(impl Named + ?Sized),
        solution: &(impl Named + ?Sized),
        enabled: bool,
    ) -> GraphResult<()> {
        let id = match self.find_edge(characteristic.name(), solution.name()) {
            Ok(id) => id,
            Err(err) => return reject(err),
        };
        self.edges[id.0].enabled = enabled;
        Ok(())
    }

    /// Whether the edge from `characteristic` to `solution` is enabled.
    ///
    /// `Ok(false)` means the edge exists and is disabled; a missing edge or
    /// endpoint is an error.
    pub fn is_edge_enabled(
        &self,
        characteristic: &(impl Named + ?Sized),
        solution: &(impl Named + ?Sized),
    ) -> GraphResult<bool> {
        let id = self.find_edge(characteristic.name(), solution.name())?;
        Ok(self.edges[id.0].enabled)
    }

    fn find_edge(&self, characteristic: &str, solution: &str) -> GraphResult<EdgeId> {
        let source = self
            .node_id(NodeKey::Characteristic(characteristic))
            .ok_or_else(|| GraphError::not_found(SubjectKind::Characteristic, characteristic))?;
        let target = self
            .node_id(NodeKey::Solution(solution))
            .ok_or_else(|| GraphError::not_found(SubjectKind::Solution, solution))?;
        self.edge_index
            .get(&(source, target))
            .copied()
            .ok_or_else(|| GraphError::EdgeNotFound {
                characteristic: characteristic.to_string(),
                solution: solution.to_string(),
            })
    }
}
