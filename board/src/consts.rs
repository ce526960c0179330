//! Shared constants for the board crate.

// ── Geometry ────────────────────────────────────────────────────

/// Number of rows and columns on the square board.
pub const BOARD_SIZE: u8 = 15;

/// Number of slots on a player's rack.
pub const RACK_SIZE: u8 = 7;

/// Row labels, top to bottom. Board slot ids are a row label plus a 1-based column.
pub const ROW_IDS: &str = "ABCDEFGHIJKLMNO";

// ── Typing mode ─────────────────────────────────────────────────

/// Maximum number of cells a typing line enumerates.
pub const TYPING_LINE_MAX: usize = 7;

/// Rack cursor value meaning "past the last tile". Cursor values above this are ignored.
pub const RACK_CURSOR_SENTINEL: u8 = RACK_SIZE + 1;

// ── Blank tiles ─────────────────────────────────────────────────

/// Symbol carried by an unassigned blank tile.
pub const BLANK: char = '?';

/// Flash period of the target cell while the blank dialog is open.
pub const BLANK_FLASH_INTERVAL_MS: u32 = 500;

/// Letters offered in the blank dialog when no alphabet is configured.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of letter buttons per row of the blank dialog grid.
pub const BLANK_TILES_PER_LINE: usize = 6;

// ── Dragging ────────────────────────────────────────────────────

/// Opacity of a tile while it is being dragged.
pub const DRAG_OPACITY: f64 = 0.5;
