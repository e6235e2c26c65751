//! Pointer-gesture state machine for the mind-map surface.
//!
//! # Responsibility
//! - Decide whether a pointer-down starts a drag or selects a connect endpoint.
//! - Apply drag moves to the model and report which edges need new geometry.
//! - Tell the caller when a completed gesture must be persisted.
//!
//! # Invariants
//! - Drag and connect selection are never active at the same time.
//! - The drag offset is fixed at pointer-down for the whole drag.
//! - Connect mode disarms after one pairing attempt on a different node.
//! - Intermediate moves never request persistence.

use crate::interaction::capability::ConfirmGate;
use crate::model::graph::{ConnectionId, GraphModel, NodeId, Position};
use log::{debug, info};

/// Confirmation text shown before clearing the whole map.
pub const CLEAR_CONFIRM_MESSAGE: &str = "Are you sure you want to clear the mind map?";

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Pointer-down on a node begins a drag.
    #[default]
    Idle,
    /// Connect mode is on, no node chosen yet.
    ConnectArmed,
    /// Connect mode is on, `selected` is the first endpoint.
    ConnectPending { selected: NodeId },
    /// A node follows the pointer, kept `offset` away from it.
    Dragging { node_id: NodeId, offset: Position },
}

impl InteractionState {
    pub fn is_connect_mode(&self) -> bool {
        matches!(self, Self::ConnectArmed | Self::ConnectPending { .. })
    }

    pub fn selected(&self) -> Option<NodeId> {
        match self {
            Self::ConnectPending { selected } => Some(*selected),
            _ => None,
        }
    }
}

/// Presentation change produced by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    /// Connect mode switched; nodes become (or stop being) connectable.
    ConnectMode(bool),
    Selected(NodeId),
    Deselected(NodeId),
    NodeAdded(NodeId),
    NodeMoved(NodeId),
    EdgeAdded(ConnectionId),
    /// Edges whose curve must be recomputed from current positions.
    EdgesDirty(Vec<ConnectionId>),
    GraphCleared,
}

/// Result of one controller input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    /// Ordered updates for the renderer.
    pub updates: Vec<ViewUpdate>,
    /// Whether the full graph must be written to the store.
    pub persist: bool,
}

impl Outcome {
    pub fn is_noop(&self) -> bool {
        self.updates.is_empty() && !self.persist
    }

    pub(crate) fn persisted(updates: Vec<ViewUpdate>) -> Self {
        Self {
            updates,
            persist: true,
        }
    }

    fn transient(updates: Vec<ViewUpdate>) -> Self {
        Self {
            updates,
            persist: false,
        }
    }
}

/// Gesture state machine. Owns no graph data.
#[derive(Debug, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Arms or disarms connect mode. Ignored while dragging.
    pub fn toggle_connect_mode(&mut self) -> Outcome {
        match self.state {
            InteractionState::Idle => {
                self.state = InteractionState::ConnectArmed;
                debug!("event=connect_mode module=interaction status=armed");
                Outcome::transient(vec![ViewUpdate::ConnectMode(true)])
            }
            InteractionState::ConnectArmed => {
                self.state = InteractionState::Idle;
                debug!("event=connect_mode module=interaction status=disarmed");
                Outcome::transient(vec![ViewUpdate::ConnectMode(false)])
            }
            InteractionState::ConnectPending { selected } => {
                self.state = InteractionState::Idle;
                debug!("event=connect_mode module=interaction status=disarmed selection=dropped");
                Outcome::transient(vec![
                    ViewUpdate::Deselected(selected),
                    ViewUpdate::ConnectMode(false),
                ])
            }
            InteractionState::Dragging { .. } => Outcome::default(),
        }
    }

    /// Handles a pointer press on `node_id` at canvas point `pointer`.
    ///
    /// Presses on ids absent from `model` or at non-finite points are ignored.
    pub fn pointer_down(
        &mut self,
        model: &mut GraphModel,
        node_id: NodeId,
        pointer: Position,
    ) -> Outcome {
        if !pointer.is_finite() {
            debug!("event=pointer_down module=interaction status=ignored reason=non_finite");
            return Outcome::default();
        }
        let Some(node_position) = model.find_node(node_id).map(|node| node.position) else {
            debug!("event=pointer_down module=interaction status=ignored reason=unknown_node");
            return Outcome::default();
        };

        match self.state {
            InteractionState::Idle => {
                self.state = InteractionState::Dragging {
                    node_id,
                    offset: pointer - node_position,
                };
                debug!("event=drag module=interaction status=start node={node_id}");
                Outcome::default()
            }
            InteractionState::ConnectArmed => {
                self.state = InteractionState::ConnectPending { selected: node_id };
                Outcome::transient(vec![ViewUpdate::Selected(node_id)])
            }
            InteractionState::ConnectPending { selected } if selected == node_id => {
                Outcome::default()
            }
            InteractionState::ConnectPending { selected } => {
                self.state = InteractionState::Idle;
                let mut updates = vec![
                    ViewUpdate::Deselected(selected),
                    ViewUpdate::ConnectMode(false),
                ];
                match model.add_connection(selected, node_id) {
                    Some(connection) => {
                        info!(
                            "event=connection_create module=interaction status=ok connection={} from={} to={}",
                            connection.id, connection.from_id, connection.to_id
                        );
                        updates.push(ViewUpdate::EdgeAdded(connection.id));
                        Outcome::persisted(updates)
                    }
                    None => {
                        debug!(
                            "event=connection_create module=interaction status=skipped reason=already_connected"
                        );
                        Outcome::transient(updates)
                    }
                }
            }
            // Unreachable through the gesture set: a drag holds the pointer.
            InteractionState::Dragging { .. } => Outcome::default(),
        }
    }

    /// Moves the dragged node so it keeps its offset from `pointer`.
    pub fn pointer_move(&mut self, model: &mut GraphModel, pointer: Position) -> Outcome {
        let InteractionState::Dragging { node_id, offset } = self.state else {
            return Outcome::default();
        };

        if !model.update_node_position(node_id, pointer - offset) {
            debug!("event=drag module=interaction status=ignored reason=rejected_position");
            return Outcome::default();
        }
        let dirty: Vec<ConnectionId> = model
            .connections_touching(node_id)
            .map(|connection| connection.id)
            .collect();

        let mut updates = vec![ViewUpdate::NodeMoved(node_id)];
        if !dirty.is_empty() {
            updates.push(ViewUpdate::EdgesDirty(dirty));
        }
        Outcome::transient(updates)
    }

    /// Ends a drag and requests a snapshot write.
    pub fn pointer_up(&mut self) -> Outcome {
        let InteractionState::Dragging { node_id, .. } = self.state else {
            return Outcome::default();
        };
        self.state = InteractionState::Idle;
        debug!("event=drag module=interaction status=end node={node_id}");
        Outcome::persisted(Vec::new())
    }

    /// Pointer left the interactive surface; ends any drag like `pointer_up`.
    pub fn pointer_leave(&mut self) -> Outcome {
        self.pointer_up()
    }

    /// Clears the whole graph after `gate` confirms. Valid in every state.
    pub fn clear_all(&mut self, model: &mut GraphModel, gate: &mut dyn ConfirmGate) -> Outcome {
        if !gate.confirm(CLEAR_CONFIRM_MESSAGE) {
            info!("event=mindmap_clear module=interaction status=declined");
            return Outcome::default();
        }

        let mut updates = Vec::new();
        if self.state.is_connect_mode() {
            updates.push(ViewUpdate::ConnectMode(false));
        }
        let dropped_nodes = model.nodes().len();
        let dropped_connections = model.connections().len();
        model.clear();
        self.state = InteractionState::Idle;
        updates.push(ViewUpdate::GraphCleared);

        info!(
            "event=mindmap_clear module=interaction status=ok nodes={dropped_nodes} connections={dropped_connections}"
        );
        Outcome::persisted(updates)
    }
}
