//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value store contract used by sessions and services.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`InvalidKey`, `Unavailable`) in
//!   addition to DB transport errors.

pub mod kv_repo;
