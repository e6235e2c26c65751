//! Mind-map graph model.
//!
//! # Responsibility
//! - Own the node and connection collections of one mind map.
//! - Enforce structural invariants on every mutation.
//! - Treat invalid connection requests as observable no-ops.
//!
//! # Invariants
//! - Every connection endpoint references a node present in `nodes`.
//! - No two connections share the same unordered endpoint pair.
//! - Connections never join a node to itself.
//! - Node and connection ids are never reused within a model's lifetime.
//! - Node coordinates are always finite.
//!
//! # See also
//! - `crate::interaction::controller` for the gesture layer driving this model.

use crate::model::ids::IdGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Add, Sub};
use uuid::Uuid;

/// Stable identifier of a mind-map node.
pub type NodeId = Uuid;

/// Stable identifier of a mind-map connection.
pub type ConnectionId = Uuid;

const MAX_ID_ATTEMPTS: usize = 64;

/// 2-D canvas coordinate. Also used as a displacement vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Neither coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Labeled, positioned point in the graph.
///
/// Serialized flat as `{ id, title, x, y }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Display label. Fixed at creation.
    pub title: String,
    /// Top-left anchor in canvas space.
    #[serde(flatten)]
    pub position: Position,
}

/// Undirected link between two distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub from_id: NodeId,
    pub to_id: NodeId,
}

impl Connection {
    /// Returns whether this connection joins `a` and `b` in either direction.
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
    }

    /// Returns whether `node_id` is one of the endpoints.
    pub fn touches(&self, node_id: NodeId) -> bool {
        self.from_id == node_id || self.to_id == node_id
    }
}

/// Persisted aggregate: the full node/connection snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Insertion order doubles as z-order.
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl Graph {
    /// Checks structural invariants of a snapshot (used on load).
    ///
    /// # Errors
    /// - Returns the first violation found, scanning nodes before connections.
    pub fn validate(&self) -> Result<(), GraphValidationError> {
        let mut seen_ids = HashSet::new();
        for node in &self.nodes {
            if node.id.is_nil() || !seen_ids.insert(node.id) {
                return Err(GraphValidationError::DuplicateId(node.id));
            }
            if node.title.trim().is_empty() {
                return Err(GraphValidationError::BlankTitle(node.id));
            }
            if !node.position.is_finite() {
                return Err(GraphValidationError::NonFinitePosition(node.id));
            }
        }
        let node_ids: HashSet<NodeId> = self.nodes.iter().map(|node| node.id).collect();

        let mut seen_pairs = HashSet::new();
        for connection in &self.connections {
            if connection.id.is_nil() || !seen_ids.insert(connection.id) {
                return Err(GraphValidationError::DuplicateId(connection.id));
            }
            if connection.from_id == connection.to_id {
                return Err(GraphValidationError::SelfLoop(connection.id));
            }
            for endpoint in [connection.from_id, connection.to_id] {
                if !node_ids.contains(&endpoint) {
                    return Err(GraphValidationError::DanglingEndpoint {
                        connection_id: connection.id,
                        node_id: endpoint,
                    });
                }
            }
            let pair = unordered_pair(connection.from_id, connection.to_id);
            if !seen_pairs.insert(pair) {
                return Err(GraphValidationError::DuplicatePair(connection.id));
            }
        }

        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connections.is_empty()
    }
}

/// Snapshot invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphValidationError {
    DuplicateId(Uuid),
    BlankTitle(NodeId),
    NonFinitePosition(NodeId),
    SelfLoop(ConnectionId),
    DanglingEndpoint {
        connection_id: ConnectionId,
        node_id: NodeId,
    },
    DuplicatePair(ConnectionId),
}

impl Display for GraphValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate or nil id in graph: {id}"),
            Self::BlankTitle(id) => write!(f, "node {id} has a blank title"),
            Self::NonFinitePosition(id) => write!(f, "node {id} has a non-finite position"),
            Self::SelfLoop(id) => write!(f, "connection {id} joins a node to itself"),
            Self::DanglingEndpoint {
                connection_id,
                node_id,
            } => write!(
                f,
                "connection {connection_id} references missing node {node_id}"
            ),
            Self::DuplicatePair(id) => {
                write!(f, "connection {id} duplicates an existing node pair")
            }
        }
    }
}

impl Error for GraphValidationError {}

/// Rejected graph mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Caller supplied unusable input (blank title, non-finite position).
    InvalidInput(&'static str),
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
        }
    }
}

impl Error for GraphError {}

/// Owner of the in-memory graph and its id supply.
pub struct GraphModel {
    graph: Graph,
    ids: Box<dyn IdGenerator>,
    issued: HashSet<Uuid>,
}

impl Debug for GraphModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphModel")
            .field("nodes", &self.graph.nodes.len())
            .field("connections", &self.graph.connections.len())
            .finish()
    }
}

impl GraphModel {
    /// Creates an empty model.
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            graph: Graph::default(),
            ids,
            issued: HashSet::new(),
        }
    }

    /// Adopts a loaded snapshot after validating it.
    ///
    /// # Errors
    /// - Returns `GraphValidationError` when the snapshot breaks an invariant.
    pub fn from_graph(
        graph: Graph,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, GraphValidationError> {
        graph.validate()?;
        let issued = graph
            .nodes
            .iter()
            .map(|node| node.id)
            .chain(graph.connections.iter().map(|connection| connection.id))
            .collect();
        Ok(Self { graph, ids, issued })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.graph.connections
    }

    /// Appends a new node.
    ///
    /// Leading and trailing whitespace is trimmed from `title`; the interior
    /// is kept as entered.
    ///
    /// # Errors
    /// - `GraphError::InvalidInput` when the title is blank or `position` is
    ///   not finite; nothing is mutated.
    pub fn add_node(&mut self, title: &str, position: Position) -> Result<Node, GraphError> {
        let title = normalize_title(title)
            .ok_or(GraphError::InvalidInput("node title must not be blank"))?;
        if !position.is_finite() {
            return Err(GraphError::InvalidInput("node position must be finite"));
        }
        let node = Node {
            id: self.fresh_id(),
            title,
            position,
        };
        self.graph.nodes.push(node.clone());
        Ok(node)
    }

    pub fn find_node(&self, id: NodeId) -> Option<&Node> {
        self.graph.nodes.iter().find(|node| node.id == id)
    }

    /// Overwrites a node's anchor and returns whether it moved.
    ///
    /// Unknown ids and non-finite positions are ignored.
    pub fn update_node_position(&mut self, id: NodeId, position: Position) -> bool {
        if !position.is_finite() {
            return false;
        }
        match self.graph.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn connection_exists(&self, a: NodeId, b: NodeId) -> bool {
        self.graph
            .connections
            .iter()
            .any(|connection| connection.joins(a, b))
    }

    /// Links two nodes.
    ///
    /// Returns `None` without mutating when `a == b`, either node is missing,
    /// or the pair is already connected in either direction.
    pub fn add_connection(&mut self, a: NodeId, b: NodeId) -> Option<Connection> {
        if a == b
            || self.find_node(a).is_none()
            || self.find_node(b).is_none()
            || self.connection_exists(a, b)
        {
            return None;
        }
        let connection = Connection {
            id: self.fresh_id(),
            from_id: a,
            to_id: b,
        };
        self.graph.connections.push(connection.clone());
        Some(connection)
    }

    /// Connections with `node_id` as either endpoint, in collection order.
    pub fn connections_touching(&self, node_id: NodeId) -> impl Iterator<Item = &Connection> {
        self.graph
            .connections
            .iter()
            .filter(move |connection| connection.touches(node_id))
    }

    /// Drops every node and connection. Issued ids stay reserved.
    pub fn clear(&mut self) {
        self.graph = Graph::default();
    }

    fn fresh_id(&mut self) -> Uuid {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.is_nil() && self.issued.insert(candidate) {
                return candidate;
            }
        }
        // Generator keeps colliding; fall back to random ids.
        loop {
            let candidate = Uuid::new_v4();
            if self.issued.insert(candidate) {
                return candidate;
            }
        }
    }
}

fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn unordered_pair(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Graph, GraphError, GraphModel, GraphValidationError, Position};
    use crate::model::ids::{IdGenerator, SequentialIds};
    use uuid::Uuid;

    struct StuckIds;

    impl IdGenerator for StuckIds {
        fn next_id(&mut self) -> Uuid {
            Uuid::from_u128(7)
        }
    }

    #[test]
    fn normalize_title_trims_ends_only() {
        assert_eq!(normalize_title("  ship \n  it "), Some("ship \n  it".to_string()));
        assert_eq!(normalize_title(" \t "), None);
    }

    #[test]
    fn non_finite_positions_are_refused() {
        let mut model = GraphModel::new(Box::new(SequentialIds::new()));
        let err = model.add_node("a", Position::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
        assert!(model.nodes().is_empty());

        let node = model.add_node("a", Position::new(1.0, 2.0)).unwrap();
        assert!(!model.update_node_position(node.id, Position::new(f64::INFINITY, 0.0)));
        assert_eq!(model.nodes()[0].position, Position::new(1.0, 2.0));
    }

    #[test]
    fn validate_rejects_non_finite_position() {
        let mut graph = Graph::default();
        graph.nodes.push(super::Node {
            id: Uuid::from_u128(1),
            title: "a".to_string(),
            position: Position::new(0.0, f64::NEG_INFINITY),
        });
        assert_eq!(
            graph.validate(),
            Err(GraphValidationError::NonFinitePosition(Uuid::from_u128(1)))
        );
    }

    #[test]
    fn colliding_generator_still_yields_unique_ids() {
        let mut model = GraphModel::new(Box::new(StuckIds));
        let a = model.add_node("a", Position::default()).unwrap();
        let b = model.add_node("b", Position::default()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut model = GraphModel::new(Box::new(SequentialIds::new()));
        let first = model.add_node("a", Position::default()).unwrap();
        model.clear();
        // Restarted generator replays id 1.
        model.ids = Box::new(SequentialIds::new());
        let second = model.add_node("b", Position::default()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn validate_rejects_dangling_endpoint() {
        let json = serde_json::json!({
            "nodes": [{ "id": Uuid::from_u128(1), "title": "a", "x": 0.0, "y": 0.0 }],
            "connections": [{
                "id": Uuid::from_u128(2),
                "fromId": Uuid::from_u128(1),
                "toId": Uuid::from_u128(3)
            }]
        });
        let graph: Graph = serde_json::from_value(json).unwrap();
        assert_eq!(
            graph.validate(),
            Err(GraphValidationError::DanglingEndpoint {
                connection_id: Uuid::from_u128(2),
                node_id: Uuid::from_u128(3),
            })
        );
    }
}
