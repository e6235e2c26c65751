//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model, controller and repository calls into use-case APIs.
//! - Keep front ends decoupled from storage details.

pub mod goal_service;
pub mod session;
