//! Networking: server queries, the real-time channel and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles request/reply calls, `channel` wraps the real-time
//! transport and `types` defines the game-state payloads both deliver.

pub mod api;
#[cfg(feature = "hydrate")]
pub mod bridge;
pub mod channel;
pub mod types;
