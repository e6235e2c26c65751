//! Core domain logic for goalmap.
//! This crate is the single source of truth for goal and mind-map invariants.

pub mod config;
pub mod db;
pub mod geometry;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use geometry::path::{compute_edge_path, CurveDescriptor, NodeRect, MAX_CURVE_HANDLE};
pub use interaction::capability::{CannedConfirm, CannedLabel, ConfirmGate, LabelPrompt};
pub use interaction::controller::{
    InteractionController, InteractionState, Outcome, ViewUpdate, CLEAR_CONFIRM_MESSAGE,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::goal::{Goal, GoalFilter, GoalId, GoalStatus, GoalValidationError};
pub use model::graph::{
    Connection, ConnectionId, Graph, GraphError, GraphModel, GraphValidationError, Node, NodeId,
    Position,
};
pub use model::ids::{IdGenerator, RandomIds, SequentialIds};
pub use render::{default_node_position, GraphRenderer, Presentation, DEFAULT_NODE_SIZE};
pub use repo::kv_repo::{
    KvRepository, MemoryKvRepository, RepoError, RepoResult, SqliteKvRepository,
};
pub use service::goal_service::{GoalResult, GoalService, GoalServiceError, NewGoalRequest};
pub use service::session::{GraphSession, SessionError, SessionResult, MINDMAP_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
