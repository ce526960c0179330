//! Wire DTOs for game state pushed by the server.
//!
//! DESIGN
//! ======
//! These mirror the server's game-state payloads so serde does all of the
//! decoding. Every field is optional except the move list: the server only
//! sends what changed.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use board::store::LayoutEntry;
use serde::Deserialize;

use crate::state::clock::TimeInfo;

/// One move as reported by the server: `[player, [coord, tiles, score]]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMove")]
pub struct MoveEntry {
    pub player: u8,
    /// Start coordinate such as `"H8"` or `"8H"`; empty for non-tile moves.
    pub coord: String,
    /// Placed letters (a `?` marks the next letter as a blank), or a
    /// keyword such as `PASS` or `EXCH abc` for other moves.
    pub tiles: String,
    pub score: i32,
}

#[derive(Deserialize)]
struct RawMove(u8, (String, String, i32));

impl From<RawMove> for MoveEntry {
    fn from(RawMove(player, (coord, tiles, score)): RawMove) -> Self {
        Self { player, coord, tiles, score }
    }
}

impl MoveEntry {
    #[must_use]
    pub fn new(player: u8, coord: &str, tiles: &str, score: i32) -> Self {
        Self { player, coord: coord.to_owned(), tiles: tiles.to_owned(), score }
    }
}

/// Game state delivered on the game channel or as a move reply.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GameUpdate {
    /// Moves not yet shown, oldest first.
    #[serde(default)]
    pub newmoves: Vec<MoveEntry>,
    #[serde(default)]
    pub scores: Option<[i32; 2]>,
    /// Seat of the player to move.
    #[serde(default)]
    pub tomove: Option<u8>,
    #[serde(default)]
    pub over: bool,
    /// Symbols on the viewer's rack.
    #[serde(default)]
    pub rack: Option<String>,
    /// Committed tiles on the board.
    #[serde(default)]
    pub tiles: Option<Vec<LayoutEntry>>,
    /// New clock base, for timed games.
    #[serde(default)]
    pub time_info: Option<TimeInfo>,
}

impl GameUpdate {
    /// Decode a channel payload.
    ///
    /// # Errors
    ///
    /// Returns the serde error when the payload is not a game update.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}
