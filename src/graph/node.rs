//! Node representation in the recommendation graph

use super::edge::EdgeId;
use crate::catalog::{Characteristic, Named, Solution};
use serde::Serialize;

/// Name reserved for the center node. Catalogs refuse entries with this name.
pub const CENTER_NAME: &str = "centerNode";

/// Index of a node within its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in creation order
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Which kind of subject a node wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Center,
    Characteristic,
    Solution,
}

impl std::fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Center => write!(f, "center"),
            Self::Characteristic => write!(f, "characteristic"),
            Self::Solution => write!(f, "solution"),
        }
    }
}

/// The payload a node wraps
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Subject {
    Center,
    Characteristic(Characteristic),
    Solution(Solution),
}

impl Subject {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Center => SubjectKind::Center,
            Self::Characteristic(_) => SubjectKind::Characteristic,
            Self::Solution(_) => SubjectKind::Solution,
        }
    }

    pub fn as_characteristic(&self) -> Option<&Characteristic> {
        match self {
            Self::Characteristic(ch) => Some(ch),
            _ => None,
        }
    }

    pub fn as_solution(&self) -> Option<&Solution> {
        match self {
            Self::Solution(s) => Some(s),
            _ => None,
        }
    }
}

impl Named for Subject {
    fn name(&self) -> &str {
        match self {
            Self::Center => CENTER_NAME,
            Self::Characteristic(ch) => &ch.name,
            Self::Solution(s) => &s.name,
        }
    }
}

/// Borrowed lookup key for a node: its kind plus its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKey<'a> {
    Center,
    Characteristic(&'a str),
    Solution(&'a str),
}

impl<'a> NodeKey<'a> {
    pub fn kind(&self) -> SubjectKind {
        match self {
            Self::Center => SubjectKind::Center,
            Self::Characteristic(_) => SubjectKind::Characteristic,
            Self::Solution(_) => SubjectKind::Solution,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            Self::Center => CENTER_NAME,
            Self::Characteristic(name) | Self::Solution(name) => name,
        }
    }
}

impl<'a> From<&'a Characteristic> for NodeKey<'a> {
    fn from(ch: &'a Characteristic) -> Self {
        Self::Characteristic(&ch.name)
    }
}

impl<'a> From<&'a Solution> for NodeKey<'a> {
    fn from(s: &'a Solution) -> Self {
        Self::Solution(&s.name)
    }
}

impl<'a> From<&'a Subject> for NodeKey<'a> {
    fn from(subject: &'a Subject) -> Self {
        match subject {
            Subject::Center => Self::Center,
            Subject::Characteristic(ch) => Self::Characteristic(&ch.name),
            Subject::Solution(s) => Self::Solution(&s.name),
        }
    }
}

/// A node in the recommendation graph
///
/// Edge lists are back-references into the owning graph's edge table.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub subject: Subject,
    /// Accumulated relevance
    pub weight: f64,
    /// Disabled nodes neither receive nor forward contributions
    pub enabled: bool,
    /// Edges leaving this node, in creation order
    pub outgoing: Vec<EdgeId>,
    /// Edges arriving at this node, in creation order
    pub incoming: Vec<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, subject: Subject) -> Self {
        Self {
            id,
            subject,
            weight: 0.0,
            enabled: true,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.subject.name()
    }

    pub fn kind(&self) -> SubjectKind {
        self.subject.kind()
    }

    pub(crate) fn add_weight(&mut self, amount: f64) {
        self.weight += amount;
    }
}
