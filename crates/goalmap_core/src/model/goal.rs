//! Goal record model.
//!
//! # Responsibility
//! - Define the goal record that calendar and list views project over.
//! - Derive completion status from progress.
//!
//! # Invariants
//! - `progress` is always within `0..=100`.
//! - `status == Completed` exactly when `progress >= 100`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable goal identifier.
pub type GoalId = Uuid;

pub const MAX_PROGRESS: u8 = 100;

/// Completion state derived from progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn for_progress(progress: u8) -> Self {
        if progress >= MAX_PROGRESS {
            Self::Completed
        } else {
            Self::InProgress
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// Goal list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalFilter {
    #[default]
    All,
    InProgress,
    Completed,
}

impl GoalFilter {
    /// Parses `all | in-progress | completed`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" => Some(Self::All),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(self, goal: &Goal) -> bool {
        match self {
            Self::All => true,
            Self::InProgress => goal.status == GoalStatus::InProgress,
            Self::Completed => goal.status == GoalStatus::Completed,
        }
    }
}

/// One planning goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unix epoch milliseconds.
    pub deadline_ms: i64,
    pub progress: u8,
    pub status: GoalStatus,
}

impl Goal {
    /// Builds a goal, clamping `progress` and deriving `status`.
    ///
    /// # Errors
    /// - `GoalValidationError::NilId` for the nil uuid.
    /// - `GoalValidationError::BlankTitle` when the trimmed title is empty.
    pub fn new(
        id: GoalId,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline_ms: i64,
        progress: i64,
    ) -> Result<Self, GoalValidationError> {
        let progress = clamp_progress(progress);
        let goal = Self {
            id,
            title: title.into().trim().to_string(),
            description: description.into(),
            deadline_ms,
            progress,
            status: GoalStatus::for_progress(progress),
        };
        goal.validate()?;
        Ok(goal)
    }

    /// Sets progress (clamped) and recomputes status.
    pub fn set_progress(&mut self, progress: i64) {
        self.progress = clamp_progress(progress);
        self.status = GoalStatus::for_progress(self.progress);
    }

    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.id.is_nil() {
            return Err(GoalValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::BlankTitle);
        }
        if self.progress > MAX_PROGRESS {
            return Err(GoalValidationError::ProgressOutOfRange(self.progress));
        }
        if self.status != GoalStatus::for_progress(self.progress) {
            return Err(GoalValidationError::StatusMismatch);
        }
        Ok(())
    }
}

/// Goal invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalValidationError {
    NilId,
    BlankTitle,
    ProgressOutOfRange(u8),
    StatusMismatch,
}

impl Display for GoalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "goal id must not be nil"),
            Self::BlankTitle => write!(f, "goal title must not be blank"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "goal progress {value} is outside 0..=100")
            }
            Self::StatusMismatch => write!(f, "goal status does not match its progress"),
        }
    }
}

impl Error for GoalValidationError {}

/// Clamps arbitrary input into `0..=100`.
pub fn clamp_progress(progress: i64) -> u8 {
    // Clamped value always fits in u8.
    progress.clamp(0, i64::from(MAX_PROGRESS)) as u8
}
