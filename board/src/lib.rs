//! Tile placement engine for the word-game board.
//!
//! The crate is linked into the browser client and never touches the DOM. It
//! owns the player's tiles while a move is being composed: dragging and
//! clicking tiles between the rack and the board, keyboard typing along a
//! line, blank-tile letter choice, and rack rearrangement. The host feeds it
//! input events and carries out the returned [`engine::Action`]s (moving
//! elements, caching the layout, enabling the submit button).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EngineCore`] and the actions it returns |
//! | [`store`] | Tiles and the slot store with its single-occupancy invariant |
//! | [`slot`] | Board cell / rack slot addressing and move coordinates |
//! | [`input`] | Input events and the interaction state machine |
//! | [`typing`] | Keyboard typing line |
//! | [`rack`] | Making room on the rack and rescrambling |
//! | [`blank`] | Two-phase blank-tile placement and the legal alphabet |
//! | [`consts`] | Board geometry and timing constants |

pub mod blank;
pub mod consts;
pub mod engine;
pub mod input;
pub mod rack;
pub mod slot;
pub mod store;
pub mod typing;
