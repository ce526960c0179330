//! Game-view widget state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Plain data owned by `GameSession`: the two clocks, the score display and
//! the move history. None of it touches the browser, so every widget is
//! tested natively.

pub mod clock;
pub mod movelist;
pub mod score;
