//! Utility helpers shared across the game view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Small, environment-facing helpers (timestamps, markup escaping, local
//! storage) kept apart from widget state so they can be tested natively.

pub mod html;
pub mod rack_persistence;
pub mod timestamp;
