//! Terminal implementations of the presentation and dialog capabilities.

use goalmap_core::{
    ConfirmGate, Connection, CurveDescriptor, LabelPrompt, Node, NodeId, NodeRect, Presentation,
};
use std::io::{BufRead, Write};

const CHAR_WIDTH: f64 = 8.0;
const NODE_PADDING: f64 = 24.0;
const NODE_HEIGHT: f64 = 40.0;
const MIN_NODE_WIDTH: f64 = 120.0;

/// Line-oriented stdin/stdout dialogs.
pub struct TerminalDialogs<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Next input line without the trailing newline; `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    fn ask(&mut self, message: &str) -> Option<String> {
        // Prompt text is best effort; a broken stdout still lets input flow.
        let _ = write!(self.output, "{message} ");
        let _ = self.output.flush();
        self.read_line()
    }
}

impl<R: BufRead, W: Write> LabelPrompt for TerminalDialogs<R, W> {
    fn request_label(&mut self, message: &str) -> Option<String> {
        self.ask(message).filter(|label| !label.trim().is_empty())
    }
}

impl<R: BufRead, W: Write> ConfirmGate for TerminalDialogs<R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]"))
            .map(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

/// Prints node and edge updates as text lines.
pub struct TerminalPresentation<W: Write> {
    output: W,
}

impl<W: Write> TerminalPresentation<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.output, "{text}");
    }
}

impl<W: Write> Presentation for TerminalPresentation<W> {
    fn reset(&mut self) {
        self.line(format_args!("-- mind map --"));
    }

    fn node_size(&self, node: &Node) -> (f64, f64) {
        let width = node.title.chars().count() as f64 * CHAR_WIDTH + NODE_PADDING;
        (width.max(MIN_NODE_WIDTH), NODE_HEIGHT)
    }

    fn show_node(&mut self, node: &Node, rect: NodeRect) {
        self.line(format_args!(
            "node {} \"{}\" at ({}, {}) size {}x{}",
            node.id, node.title, rect.origin.x, rect.origin.y, rect.width, rect.height
        ));
    }

    fn draw_edge(&mut self, connection: &Connection, curve: &CurveDescriptor) {
        self.line(format_args!(
            "edge {} {} <-> {} d=\"{}\"",
            connection.id,
            connection.from_id,
            connection.to_id,
            curve.to_svg_path()
        ));
    }

    fn set_selected(&mut self, node_id: NodeId, selected: bool) {
        let marker = if selected { "selected" } else { "deselected" };
        self.line(format_args!("{marker} {node_id}"));
    }

    fn set_connect_mode(&mut self, active: bool) {
        let marker = if active { "on" } else { "off" };
        self.line(format_args!("connect mode {marker}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{TerminalDialogs, TerminalPresentation};
    use goalmap_core::{ConfirmGate, LabelPrompt, Node, NodeId, Position, Presentation};
    use std::io::Cursor;

    #[test]
    fn blank_label_counts_as_cancelled() {
        let mut dialogs = TerminalDialogs::new(Cursor::new("   \nIdea\n"), Vec::new());
        assert_eq!(dialogs.request_label("title?"), None);
        assert_eq!(dialogs.request_label("title?"), Some("Idea".to_string()));
        assert_eq!(dialogs.request_label("title?"), None);
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut dialogs = TerminalDialogs::new(Cursor::new("Y\nno\n"), Vec::new());
        assert!(dialogs.confirm("sure?"));
        assert!(!dialogs.confirm("sure?"));
        assert!(!dialogs.confirm("sure?"));
    }

    #[test]
    fn node_width_grows_with_title() {
        let presentation = TerminalPresentation::new(Vec::new());
        let node = Node {
            id: NodeId::from_u128(1),
            title: "a much longer node title".to_string(),
            position: Position::default(),
        };
        let (width, height) = presentation.node_size(&node);
        assert_eq!(width, 24.0 * 8.0 + 24.0);
        assert_eq!(height, 40.0);
    }
}
