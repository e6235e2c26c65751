//! Presentation adapter for the mind map.
//!
//! # Responsibility
//! - Push model state and controller updates to an abstract `Presentation`.
//! - Compute edge curves from the node rectangles the presentation reports.
//!
//! # Invariants
//! - Edge curves are always computed from the current node positions.
//! - Connections with a missing endpoint are skipped, never drawn.

use crate::geometry::path::{compute_edge_path, CurveDescriptor, NodeRect};
use crate::interaction::controller::{InteractionState, Outcome, ViewUpdate};
use crate::model::graph::{Connection, ConnectionId, GraphModel, Node, NodeId, Position};

/// Default on-screen node size; new nodes are centered using half of it.
pub const DEFAULT_NODE_SIZE: (f64, f64) = (120.0, 40.0);

/// Drawing surface consumed by `GraphRenderer`.
pub trait Presentation {
    /// Drops everything currently shown.
    fn reset(&mut self);
    /// Width and height a node occupies on screen.
    fn node_size(&self, _node: &Node) -> (f64, f64) {
        DEFAULT_NODE_SIZE
    }
    /// Creates or moves a node's view.
    fn show_node(&mut self, node: &Node, rect: NodeRect);
    /// Creates or updates an edge's path.
    fn draw_edge(&mut self, connection: &Connection, curve: &CurveDescriptor);
    fn set_selected(&mut self, node_id: NodeId, selected: bool);
    /// Marks every node connectable (or not) and reflects the toggle state.
    fn set_connect_mode(&mut self, active: bool);
}

/// Top-left anchor that centers a default-sized node on the canvas.
pub fn default_node_position(canvas_width: f64, canvas_height: f64) -> Position {
    Position::new(
        canvas_width / 2.0 - DEFAULT_NODE_SIZE.0 / 2.0,
        canvas_height / 2.0 - DEFAULT_NODE_SIZE.1 / 2.0,
    )
}

/// Adapter from graph state to a `Presentation`.
#[derive(Debug)]
pub struct GraphRenderer<P: Presentation> {
    presentation: P,
}

impl<P: Presentation> GraphRenderer<P> {
    pub fn new(presentation: P) -> Self {
        Self { presentation }
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn into_presentation(self) -> P {
        self.presentation
    }

    /// Redraws everything: nodes, then every edge, then mode and selection.
    pub fn render_all(&mut self, model: &GraphModel, state: InteractionState) {
        self.presentation.reset();
        for node in model.nodes() {
            let rect = self.node_rect(node);
            self.presentation.show_node(node, rect);
        }
        for connection in model.connections() {
            self.draw_connection(model, connection);
        }
        if state.is_connect_mode() {
            self.presentation.set_connect_mode(true);
        }
        if let Some(selected) = state.selected() {
            self.presentation.set_selected(selected, true);
        }
    }

    /// Applies incremental updates from one controller outcome.
    pub fn apply(&mut self, model: &GraphModel, state: InteractionState, outcome: &Outcome) {
        for update in &outcome.updates {
            match update {
                ViewUpdate::ConnectMode(active) => self.presentation.set_connect_mode(*active),
                ViewUpdate::Selected(node_id) => self.presentation.set_selected(*node_id, true),
                ViewUpdate::Deselected(node_id) => {
                    self.presentation.set_selected(*node_id, false)
                }
                ViewUpdate::NodeAdded(_) | ViewUpdate::EdgeAdded(_) | ViewUpdate::GraphCleared => {
                    self.render_all(model, state)
                }
                ViewUpdate::NodeMoved(node_id) => {
                    if let Some(node) = model.find_node(*node_id) {
                        let rect = self.node_rect(node);
                        self.presentation.show_node(node, rect);
                    }
                }
                ViewUpdate::EdgesDirty(ids) => self.redraw_edges(model, ids),
            }
        }
    }

    /// Curve for `connection` from current positions, if both endpoints exist.
    pub fn edge_curve(
        &self,
        model: &GraphModel,
        connection: &Connection,
    ) -> Option<CurveDescriptor> {
        let from = model.find_node(connection.from_id)?;
        let to = model.find_node(connection.to_id)?;
        Some(compute_edge_path(&self.node_rect(from), &self.node_rect(to)))
    }

    fn redraw_edges(&mut self, model: &GraphModel, ids: &[ConnectionId]) {
        for connection in model
            .connections()
            .iter()
            .filter(|connection| ids.contains(&connection.id))
        {
            self.draw_connection(model, connection);
        }
    }

    fn draw_connection(&mut self, model: &GraphModel, connection: &Connection) {
        if let Some(curve) = self.edge_curve(model, connection) {
            self.presentation.draw_edge(connection, &curve);
        }
    }

    fn node_rect(&self, node: &Node) -> NodeRect {
        let (width, height) = self.presentation.node_size(node);
        NodeRect::new(node.position, width, height)
    }
}
