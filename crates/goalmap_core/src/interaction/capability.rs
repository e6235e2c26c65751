//! Blocking user-dialog capabilities consumed by the interaction layer.
//!
//! Front ends implement these over their own modal dialogs; tests use canned
//! answers.

/// Requests a short label from the user.
pub trait LabelPrompt {
    /// Returns `None` when the user cancelled.
    fn request_label(&mut self, message: &str) -> Option<String>;
}

/// Yes/no gate in front of destructive actions.
pub trait ConfirmGate {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt that always answers with the same value.
#[derive(Debug, Clone, Default)]
pub struct CannedLabel(pub Option<String>);

impl CannedLabel {
    pub fn answer(label: impl Into<String>) -> Self {
        Self(Some(label.into()))
    }

    pub fn cancelled() -> Self {
        Self(None)
    }
}

impl LabelPrompt for CannedLabel {
    fn request_label(&mut self, _message: &str) -> Option<String> {
        self.0.clone()
    }
}

/// Gate that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct CannedConfirm(pub bool);

impl ConfirmGate for CannedConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}
