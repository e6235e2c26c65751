//! Interaction layer for the mind-map surface.
//!
//! # Responsibility
//! - Translate pointer gestures into graph mutations.
//! - Declare the dialog capabilities the gestures depend on.
//!
//! # Invariants
//! - Nothing here touches a presentation surface or a store directly.

pub mod capability;
pub mod controller;
