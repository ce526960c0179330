//! Blank-tile letter assignment.
//!
//! Moving a blank onto the board is a two-phase operation. The engine opens
//! a placement and hands out a [`PendingPlacement`] handle; the move only
//! happens when the handle is resolved with a letter. Cancelling leaves the
//! tile where it was. The dialog is modal: while a placement is open the
//! engine ignores every other input.

#[cfg(test)]
#[path = "blank_test.rs"]
mod blank_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BLANK_TILES_PER_LINE, DEFAULT_ALPHABET};
use crate::input::Key;
use crate::slot::Slot;
use crate::store::TileId;

/// Handle to an open blank-tile placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPlacement {
    /// Distinguishes this placement from earlier ones; stale handles are rejected.
    pub id: u64,
    pub tile: TileId,
    /// Where the tile sits until the placement resolves.
    pub origin: Slot,
    /// Board cell the tile goes to once a letter is chosen.
    pub target: Slot,
}

/// Answer to the blank dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankOutcome {
    Letter(char),
    Cancel,
}

/// Letters a blank may stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Build from a string of letters. Letters are stored uppercase, duplicates dropped.
    #[must_use]
    pub fn new(letters: &str) -> Self {
        let mut out: Vec<char> = Vec::new();
        for c in letters.chars().flat_map(char::to_uppercase) {
            if c.is_alphabetic() && !out.contains(&c) {
                out.push(c);
            }
        }
        Self { letters: out }
    }

    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The canonical letter for `c`, matching case-insensitively.
    #[must_use]
    pub fn canonical(&self, c: char) -> Option<char> {
        let upper = c.to_uppercase().next()?;
        self.letters.contains(&upper).then_some(upper)
    }

    /// Letters grouped into dialog rows.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<char>> {
        self.letters.chunks(BLANK_TILES_PER_LINE).map(<[char]>::to_vec).collect()
    }

    /// What a key press means while the dialog is open. `None` for keys the dialog ignores.
    #[must_use]
    pub fn outcome_for_key(&self, key: Key) -> Option<BlankOutcome> {
        match key {
            Key::Escape => Some(BlankOutcome::Cancel),
            Key::Char(c) => self.canonical(c).map(BlankOutcome::Letter),
            _ => None,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHABET)
    }
}
