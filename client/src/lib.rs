//! # client
//!
//! Game-view layer around the `board` tile placement engine: clocks, score
//! display, move history, the real-time channel and server queries, all
//! owned by one [`session::GameSession`] per open game.
//!
//! Browser glue (`browser`, `net::bridge`) is compiled only with the
//! `hydrate` feature; everything else is plain Rust and tested natively.

pub mod config;
pub mod error;
pub mod net;
pub mod session;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;
