//! Goal use-case service.
//!
//! # Responsibility
//! - Create goals, update progress and list goals for the list/calendar views.
//! - Persist the whole goal collection as one store document.
//!
//! # Invariants
//! - Progress is clamped to `0..=100` and status re-derived on every write.
//! - Listing is sorted by deadline ascending; ties keep creation order.
//! - A new goal never reuses an id already stored.

use crate::model::goal::{Goal, GoalFilter, GoalId, GoalValidationError};
use crate::model::ids::IdGenerator;
use crate::repo::kv_repo::{KvRepository, RepoError};
use log::{info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store key holding the serialized goal list.
pub const GOALS_KEY: &str = "goals";

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const MAX_ID_ATTEMPTS: usize = 64;

pub type GoalResult<T> = Result<T, GoalServiceError>;

/// Service error for goal use-cases.
#[derive(Debug)]
pub enum GoalServiceError {
    Validation(GoalValidationError),
    NotFound(GoalId),
    Repo(RepoError),
    /// Stored goal document is malformed.
    InvalidData(String),
}

impl Display for GoalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "goal not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted goals: {message}"),
        }
    }
}

impl Error for GoalServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<GoalValidationError> for GoalServiceError {
    fn from(value: GoalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for GoalServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Request model for creating a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoalRequest {
    pub title: String,
    pub description: String,
    /// Unix epoch milliseconds.
    pub deadline_ms: i64,
    /// Clamped to `0..=100`.
    pub progress: i64,
}

/// Goal service facade.
pub struct GoalService<R: KvRepository> {
    repo: R,
    ids: Box<dyn IdGenerator>,
}

impl<R: KvRepository> GoalService<R> {
    pub fn new(repo: R, ids: Box<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Creates and persists one goal.
    pub fn create_goal(&mut self, request: &NewGoalRequest) -> GoalResult<Goal> {
        let mut goals = self.load_goals()?;
        let goal = Goal::new(
            self.fresh_id(&goals),
            request.title.as_str(),
            request.description.as_str(),
            request.deadline_ms,
            request.progress,
        )?;
        goals.push(goal.clone());
        self.save_goals(&goals)?;
        info!(
            "event=goal_create module=goal status=ok goal={} progress={}",
            goal.id, goal.progress
        );
        Ok(goal)
    }

    /// Sets progress on an existing goal; returns the updated record.
    pub fn update_progress(&self, id: GoalId, progress: i64) -> GoalResult<Goal> {
        let mut goals = self.load_goals()?;
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(GoalServiceError::NotFound(id))?;
        goal.set_progress(progress);
        let updated = goal.clone();
        self.save_goals(&goals)?;
        info!(
            "event=goal_progress module=goal status=ok goal={} progress={} goal_status={}",
            updated.id,
            updated.progress,
            updated.status.as_str()
        );
        Ok(updated)
    }

    /// Goals matching `filter`, earliest deadline first.
    pub fn list_goals(&self, filter: GoalFilter) -> GoalResult<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .load_goals()?
            .into_iter()
            .filter(|goal| filter.matches(goal))
            .collect();
        goals.sort_by_key(|goal| goal.deadline_ms);
        Ok(goals)
    }

    /// Goals whose deadline falls in `[day_start_ms, day_start_ms + 24h)`.
    pub fn goals_due_on(&self, day_start_ms: i64) -> GoalResult<Vec<Goal>> {
        let day_end_ms = day_start_ms.saturating_add(DAY_MS);
        Ok(self
            .list_goals(GoalFilter::All)?
            .into_iter()
            .filter(|goal| goal.deadline_ms >= day_start_ms && goal.deadline_ms < day_end_ms)
            .collect())
    }

    fn load_goals(&self) -> GoalResult<Vec<Goal>> {
        let Some(raw) = self.repo.get(GOALS_KEY)? else {
            return Ok(Vec::new());
        };
        let goals: Vec<Goal> = serde_json::from_str(&raw)
            .map_err(|err| GoalServiceError::InvalidData(err.to_string()))?;
        for goal in &goals {
            goal.validate().map_err(|err| {
                GoalServiceError::InvalidData(format!("goal {}: {err}", goal.id))
            })?;
        }
        Ok(goals)
    }

    fn fresh_id(&mut self, goals: &[Goal]) -> GoalId {
        let taken: HashSet<GoalId> = goals.iter().map(|goal| goal.id).collect();
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.is_nil() && !taken.contains(&candidate) {
                return candidate;
            }
        }
        warn!("event=goal_create module=goal status=degraded reason=id_collisions");
        loop {
            let candidate = GoalId::new_v4();
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn save_goals(&self, goals: &[Goal]) -> GoalResult<()> {
        let payload = serde_json::to_string(goals)
            .map_err(|err| GoalServiceError::InvalidData(err.to_string()))?;
        self.repo.put(GOALS_KEY, &payload)?;
        Ok(())
    }
}
