//! Graph operation outcomes that are not successes

use super::node::SubjectKind;
use thiserror::Error;

/// Why a graph operation did nothing.
///
/// These are expected in normal use (a topic mentioned twice, a correction for
/// something never observed). Every operation that returns one leaves the graph
/// unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("{kind} '{name}' is not in the catalog")]
    NotInCatalog { kind: SubjectKind, name: String },

    #[error("{kind} '{name}' is already in the graph")]
    AlreadyPresent { kind: SubjectKind, name: String },

    #[error("{kind} '{name}' is not in the graph")]
    NotFound { kind: SubjectKind, name: String },

    #[error("No edge from '{characteristic}' to '{solution}'")]
    EdgeNotFound {
        characteristic: String,
        solution: String,
    },

    #[error("'{characteristic}' is already connected to '{solution}'")]
    AlreadyConnected {
        characteristic: String,
        solution: String,
    },

    #[error("Increment amount must be finite, got {0}")]
    InvalidAmount(f64),

    #[error("'{characteristic}' declares no affinity to '{solution}'")]
    NoAffinity {
        characteristic: String,
        solution: String,
    },
}

impl GraphError {
    pub(crate) fn not_found(kind: SubjectKind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;
