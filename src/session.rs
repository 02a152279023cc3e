//! SessionEngine: one context graph per conversation
//!
//! Catalogs are loaded once and shared; each session owns its own graph.
//! Every operation runs under the session's map entry lock, so an increment
//! and its propagation are never observed half-done by a ranking query.

use crate::catalog::{Catalog, Characteristic, Named, Solution};
use crate::graph::{ContextGraph, GraphError, GraphResult, Propagation, DEFAULT_INCREMENT};
use crate::query::RankingMode;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Unique identifier for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random SessionId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// A conversation's graph and its timestamps
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub graph: ContextGraph,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Hosts many independent sessions over one pair of catalogs
#[derive(Debug)]
pub struct SessionEngine {
    characteristics: Arc<Catalog<Characteristic>>,
    solutions: Arc<Catalog<Solution>>,
    sessions: DashMap<SessionId, Session>,
    default_increment: f64,
}

impl SessionEngine {
    pub fn new(characteristics: Catalog<Characteristic>, solutions: Catalog<Solution>) -> Self {
        Self {
            characteristics: Arc::new(characteristics),
            solutions: Arc::new(solutions),
            sessions: DashMap::new(),
            default_increment: DEFAULT_INCREMENT,
        }
    }

    /// Set the amount used by [`SessionEngine::observe`]
    pub fn with_default_increment(mut self, amount: f64) -> Self {
        self.default_increment = amount;
        self
    }

    /// Start a session with a freshly built graph
    pub fn open_session(&self) -> SessionId {
        let id = SessionId::new();
        let now = Utc::now();
        let graph =
            ContextGraph::from_shared(Arc::clone(&self.characteristics), Arc::clone(&self.solutions));
        self.sessions.insert(
            id,
            Session {
                id,
                graph,
                created_at: now,
                updated_at: now,
            },
        );
        debug!(session = %id, "opened session");
        id
    }

    /// End a session. Returns false if it did not exist.
    pub fn close_session(&self, id: &SessionId) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn has_session(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// List all session IDs
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|r| *r.key()).collect()
    }

    /// When a session was created and last modified
    pub fn timestamps(&self, id: &SessionId) -> SessionResult<(DateTime<Utc>, DateTime<Utc>)> {
        self.sessions
            .get(id)
            .map(|s| (s.created_at, s.updated_at))
            .ok_or(SessionError::SessionNotFound(*id))
    }

    /// Read a session's graph under its lock
    pub fn with_graph<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&ContextGraph) -> R,
    ) -> SessionResult<R> {
        let session = self
            .sessions
            .get(id)
            .ok_or(SessionError::SessionNotFound(*id))?;
        Ok(f(&session.graph))
    }

    /// Mutate a session's graph under its lock. Counts as a modification
    /// whatever the closure does.
    pub fn with_graph_mut<R>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut ContextGraph) -> R,
    ) -> SessionResult<R> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::SessionNotFound(*id))?;
        let result = f(&mut session.graph);
        session.updated_at = Utc::now();
        Ok(result)
    }

    /// Increment a characteristic in one session
    pub fn increment(
        &self,
        id: &SessionId,
        characteristic: &(impl Named + ?Sized),
        amount: f64,
    ) -> SessionResult<Propagation> {
        self.update(id, |g| g.increment(characteristic, amount))
    }

    /// Run a graph operation under the session's lock, touching `updated_at`
    /// only if it succeeds
    fn update<T>(
        &self,
        id: &SessionId,
        f: impl FnOnce(&mut ContextGraph) -> GraphResult<T>,
    ) -> SessionResult<T> {
        let mut session = self
            .sessions
            .get_mut(id)
            .ok_or(SessionError::SessionNotFound(*id))?;
        let value = f(&mut session.graph)?;
        session.updated_at = Utc::now();
        Ok(value)
    }

    /// Increment by the engine's default amount
    pub fn observe(
        &self,
        id: &SessionId,
        characteristic: &(impl Named + ?Sized),
    ) -> SessionResult<Propagation> {
        self.increment(id, characteristic, self.default_increment)
    }

    /// Snapshot of a session's ranking
    pub fn ranked_solutions(&self, id: &SessionId, mode: RankingMode) -> SessionResult<Vec<Solution>> {
        self.with_graph(id, |g| {
            g.ranking_with(mode)
                .into_iter()
                .map(|r| r.solution.clone())
                .collect()
        })
    }

    pub fn top_solution(&self, id: &SessionId) -> SessionResult<Option<Solution>> {
        self.with_graph(id, |g| g.top_solution().cloned())
    }

    pub fn characteristics(&self) -> &Catalog<Characteristic> {
        &self.characteristics
    }

    pub fn solutions(&self) -> &Catalog<Solution> {
        &self.solutions
    }
}
