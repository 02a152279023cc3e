//! Core graph data structures

mod context;
mod controls;
mod edge;
mod error;
mod node;
mod propagate;
mod render;


pub use context::{ContextGraph, SolutionWiring};
pub use edge::{Edge, EdgeId};
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeId, NodeKey, Subject, SubjectKind, CENTER_NAME};
pub use propagate::{Propagation, DEFAULT_INCREMENT};
pub use render::{EdgeView, GraphSnapshot, NodeView};
