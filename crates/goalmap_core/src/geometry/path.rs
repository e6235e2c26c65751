//! Edge curve geometry.
//!
//! Edges are drawn as horizontal S-curves between node centers. The control
//! handle length is half the horizontal distance, capped so distant nodes do
//! not produce very long handles.

use crate::model::graph::Position;

/// Upper bound for the horizontal control-handle length.
pub const MAX_CURVE_HANDLE: f64 = 100.0;

/// On-screen rectangle of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRect {
    pub origin: Position,
    pub width: f64,
    pub height: f64,
}

impl NodeRect {
    pub const fn new(origin: Position, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }
}

/// Cubic Bézier from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDescriptor {
    pub start: Position,
    pub control_start: Position,
    pub control_end: Position,
    pub end: Position,
}

impl CurveDescriptor {
    /// Horizontal handle length used for both control points.
    pub fn handle(&self) -> f64 {
        self.control_start.x - self.start.x
    }

    /// SVG path data, e.g. `M 0 0 C 100 0 200 0 300 0`.
    pub fn to_svg_path(&self) -> String {
        format!(
            "M {} {} C {} {} {} {} {} {}",
            self.start.x,
            self.start.y,
            self.control_start.x,
            self.control_start.y,
            self.control_end.x,
            self.control_end.y,
            self.end.x,
            self.end.y
        )
    }
}

/// Computes the curve joining the centers of two node rectangles.
pub fn compute_edge_path(from: &NodeRect, to: &NodeRect) -> CurveDescriptor {
    let start = from.center();
    let end = to.center();
    let curve = ((end.x - start.x).abs() / 2.0).min(MAX_CURVE_HANDLE);

    CurveDescriptor {
        start,
        control_start: Position::new(start.x + curve, start.y),
        control_end: Position::new(end.x - curve, end.y),
        end,
    }
}
