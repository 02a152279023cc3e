//! Convograph: Weighted Recommendation Graph for Conversations
//!
//! Characteristics observed in a conversation push weight through
//! multiplier-labelled edges into candidate solutions; the heaviest solution
//! is the current recommendation.
//!
//! # Core Concepts
//!
//! - **Catalogs**: The known characteristics (with synonyms and solution
//!   affinities) and the known solutions, loaded once
//! - **Context graph**: A center node, one node per characteristic and
//!   solution, and edges that scale weight by their multiplier
//! - **Sessions**: Independent graphs over shared catalogs, one per conversation
//!
//! # Example
//!
//! ```
//! use convograph::{Catalog, Characteristic, ContextGraph, Solution};
//!
//! let therapy = Solution::new("Therapy");
//! let characteristics = Catalog::new(vec![
//!     Characteristic::new("Anxiety").with_affinity(therapy.clone(), 2.0),
//! ]).unwrap();
//! let solutions = Catalog::new(vec![therapy]).unwrap();
//!
//! let mut graph = ContextGraph::new(characteristics, solutions);
//! graph.increment("Anxiety", 3.0).unwrap();
//! assert_eq!(graph.top_solution().map(|s| s.name.as_str()), Some("Therapy"));
//! ```

pub mod catalog;
pub mod config;
mod graph;
pub mod query;
pub mod session;

pub use catalog::{
    load_catalogs, Affinity, Catalog, CatalogError, CatalogResult, Characteristic, Named, Solution,
};
pub use config::{Config, ConfigError, ConfigResult};
pub use graph::{
    ContextGraph, Edge, EdgeId, EdgeView, GraphError, GraphResult, GraphSnapshot, Node, NodeId,
    NodeKey, NodeView, Propagation, SolutionWiring, Subject, SubjectKind, CENTER_NAME,
    DEFAULT_INCREMENT,
};
pub use query::{RankedSolution, RankingMode};
pub use session::{Session, SessionEngine, SessionError, SessionId, SessionResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
