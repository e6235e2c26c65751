//! Identifier supply for graph and goal records.
//!
//! # Responsibility
//! - Decouple id assignment from wall-clock time.
//! - Let tests inject deterministic, collision-free ids.
//!
//! # Invariants
//! - Generators never return the nil uuid.

use uuid::Uuid;

/// Source of fresh record identifiers.
pub trait IdGenerator {
    /// Returns the next identifier.
    fn next_id(&mut self) -> Uuid;
}

/// Random v4 uuid generator used by production sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic generator yielding `1, 2, 3, ...` encoded as uuids.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    /// Starts the sequence at `1`.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Starts the sequence at `first`; `0` is bumped to `1` to avoid the nil uuid.
    pub fn starting_at(first: u128) -> Self {
        Self {
            next: first.max(1),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next);
        self.next = self.next.checked_add(1).unwrap_or(1);
        id
    }
}
