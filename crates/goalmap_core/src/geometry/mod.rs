//! Pure geometry helpers for rendering the mind map.

pub mod path;
