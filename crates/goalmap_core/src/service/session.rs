//! Mind-map editing session.
//!
//! # Responsibility
//! - Own the graph model, gesture controller and store for one editing session.
//! - Load the persisted graph once on open and write full snapshots after
//!   node creation, connection creation, drag completion and clear.
//!
//! # Invariants
//! - The in-memory graph stays authoritative when a store write fails.
//! - Intermediate drag moves never touch the store.
//! - Cancelled or blank labels never reach `GraphModel::add_node`.

use crate::interaction::capability::{ConfirmGate, LabelPrompt};
use crate::interaction::controller::{InteractionController, InteractionState, Outcome, ViewUpdate};
use crate::model::graph::{Graph, GraphError, GraphModel, GraphValidationError, NodeId, Position};
use crate::model::ids::IdGenerator;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key holding the serialized graph.
pub const MINDMAP_KEY: &str = "mindmap";

/// Text shown by the label prompt when adding a node.
pub const NODE_TITLE_PROMPT: &str = "Enter node title:";

pub type SessionResult<T> = Result<T, SessionError>;

/// Errors surfaced by session operations.
#[derive(Debug)]
pub enum SessionError {
    /// Store read/write failure. In-memory state is kept.
    Store(RepoError),
    /// Stored document could not be decoded or broke graph invariants.
    InvalidData(String),
    /// Rejected mutation input.
    Graph(GraphError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted mind map: {message}"),
            Self::Graph(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Graph(err) => Some(err),
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<GraphError> for SessionError {
    fn from(value: GraphError) -> Self {
        Self::Graph(value)
    }
}

impl From<GraphValidationError> for SessionError {
    fn from(value: GraphValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// One mind-map editing session bound to a store.
#[derive(Debug)]
pub struct GraphSession<R: KvRepository> {
    model: GraphModel,
    controller: InteractionController,
    repo: R,
    key: String,
}

impl<R: KvRepository> GraphSession<R> {
    /// Opens the session stored under `MINDMAP_KEY`.
    pub fn open(repo: R, ids: Box<dyn IdGenerator>) -> SessionResult<Self> {
        Self::open_with_key(repo, ids, MINDMAP_KEY)
    }

    /// Loads the graph stored under `key`, or starts empty when absent.
    ///
    /// # Errors
    /// - `SessionError::Store` when the store cannot be read.
    /// - `SessionError::InvalidData` when the stored document is malformed.
    pub fn open_with_key(
        repo: R,
        ids: Box<dyn IdGenerator>,
        key: impl Into<String>,
    ) -> SessionResult<Self> {
        let key = key.into();
        let model = match load_graph(&repo, &key)? {
            Some(graph) => GraphModel::from_graph(graph, ids)?,
            None => GraphModel::new(ids),
        };
        info!(
            "event=session_open module=session status=ok nodes={} connections={}",
            model.nodes().len(),
            model.connections().len()
        );
        Ok(Self {
            model,
            controller: InteractionController::new(),
            repo,
            key,
        })
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn state(&self) -> InteractionState {
        self.controller.state()
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Asks `prompt` for a title and adds a node at `position`.
    ///
    /// Cancelled or blank answers are a no-op.
    pub fn add_node(
        &mut self,
        prompt: &mut dyn LabelPrompt,
        position: Position,
    ) -> SessionResult<Outcome> {
        let Some(title) = prompt
            .request_label(NODE_TITLE_PROMPT)
            .filter(|title| !title.trim().is_empty())
        else {
            return Ok(Outcome::default());
        };

        let node = self.model.add_node(&title, position)?;
        info!("event=node_create module=session status=ok node={}", node.id);
        self.commit(Outcome::persisted(vec![ViewUpdate::NodeAdded(node.id)]))
    }

    pub fn toggle_connect_mode(&mut self) -> Outcome {
        self.controller.toggle_connect_mode()
    }

    pub fn pointer_down(&mut self, node_id: NodeId, pointer: Position) -> SessionResult<Outcome> {
        let outcome = self.controller.pointer_down(&mut self.model, node_id, pointer);
        self.commit(outcome)
    }

    pub fn pointer_move(&mut self, pointer: Position) -> Outcome {
        self.controller.pointer_move(&mut self.model, pointer)
    }

    pub fn pointer_up(&mut self) -> SessionResult<Outcome> {
        let outcome = self.controller.pointer_up();
        self.commit(outcome)
    }

    pub fn pointer_leave(&mut self) -> SessionResult<Outcome> {
        let outcome = self.controller.pointer_leave();
        self.commit(outcome)
    }

    /// Clears the map once `gate` confirms.
    pub fn clear_all(&mut self, gate: &mut dyn ConfirmGate) -> SessionResult<Outcome> {
        let outcome = self.controller.clear_all(&mut self.model, gate);
        self.commit(outcome)
    }

    /// Writes the full graph snapshot to the store.
    pub fn save(&self) -> SessionResult<()> {
        let payload = serde_json::to_string(self.model.graph())
            .map_err(|err| SessionError::InvalidData(err.to_string()))?;
        self.repo.put(&self.key, &payload).map_err(|err| {
            error!(
                "event=mindmap_save module=session status=error nodes={} connections={} error={err}",
                self.model.nodes().len(),
                self.model.connections().len()
            );
            SessionError::from(err)
        })?;
        info!(
            "event=mindmap_save module=session status=ok nodes={} connections={}",
            self.model.nodes().len(),
            self.model.connections().len()
        );
        Ok(())
    }

    fn commit(&self, outcome: Outcome) -> SessionResult<Outcome> {
        if outcome.persist {
            self.save()?;
        }
        Ok(outcome)
    }
}

/// Reads and decodes the graph stored under `key`.
pub fn load_graph(repo: &impl KvRepository, key: &str) -> SessionResult<Option<Graph>> {
    let Some(raw) = repo.get(key)? else {
        return Ok(None);
    };
    let graph: Graph = serde_json::from_str(&raw).map_err(|err| {
        error!(
            "event=mindmap_load module=session status=error error_code=decode_failed error={err}"
        );
        SessionError::InvalidData(err.to_string())
    })?;
    Ok(Some(graph))
}

#[cfg(test)]
mod tests {
    use super::{GraphSession, SessionError, MINDMAP_KEY};
    use crate::interaction::capability::CannedLabel;
    use crate::model::graph::Position;
    use crate::model::ids::SequentialIds;
    use crate::repo::kv_repo::{KvRepository, MemoryKvRepository};

    #[test]
    fn cancelled_prompt_adds_nothing() {
        let store = MemoryKvRepository::new();
        let mut session = GraphSession::open(&store, Box::new(SequentialIds::new())).unwrap();

        let outcome = session
            .add_node(&mut CannedLabel::cancelled(), Position::default())
            .unwrap();
        assert!(outcome.is_noop());
        let outcome = session
            .add_node(&mut CannedLabel::answer("   "), Position::default())
            .unwrap();
        assert!(outcome.is_noop());
        assert!(session.model().nodes().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn malformed_document_is_rejected_on_open() {
        let store = MemoryKvRepository::new();
        store.put(MINDMAP_KEY, "{not json").unwrap();
        let err = GraphSession::open(&store, Box::new(SequentialIds::new())).unwrap_err();
        assert!(matches!(err, SessionError::InvalidData(_)));
    }
}
