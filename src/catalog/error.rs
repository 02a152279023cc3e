//! Catalog load errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a catalog.
///
/// Any of these aborts the whole load; no partial catalog is returned.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("Invalid multiplier on line {line}: {token}")]
    InvalidMultiplier { line: usize, token: String },

    #[error("Duplicate catalog entry: {0}")]
    DuplicateName(String),

    #[error("Reserved name cannot be cataloged: {0}")]
    ReservedName(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
