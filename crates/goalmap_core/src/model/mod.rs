//! Domain model for goals and the mind-map graph.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep structural invariants next to the data they protect.
//!
//! # Invariants
//! - Every record is identified by a stable uuid supplied by an `IdGenerator`.

pub mod goal;
pub mod graph;
pub mod ids;
