//! Slot addressing: board cells, rack positions, and their string ids.
//!
//! Every place a tile can sit is a [`Slot`]. Board cells are addressed by a
//! row letter and a 1-based column (`"A1"` .. `"O15"`), rack positions by
//! `"R1"` .. `"R7"`. The string form is what the host uses for DOM ids and
//! what the local rack cache stores, so parsing and formatting must
//! round-trip exactly.
//!
//! Move coordinates from the server use the same cell naming but encode
//! orientation in their order: row-first (`"H8"`) is a horizontal word,
//! column-first (`"8H"`) a vertical one.

#[cfg(test)]
#[path = "slot_test.rs"]
mod slot_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{BOARD_SIZE, RACK_SIZE, ROW_IDS};

/// Errors from parsing slot ids and move coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("invalid slot id: {0:?}")]
    InvalidId(String),
    #[error("invalid move coordinate: {0:?}")]
    InvalidCoordinate(String),
}

/// A board cell, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    /// Build a cell, returning `None` when it falls off the board.
    #[must_use]
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }

    /// The next cell in `orientation`, or `None` past the board edge.
    #[must_use]
    pub fn step(self, orientation: Orientation) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => Self::new(self.row, self.col + 1),
            Orientation::Vertical => Self::new(self.row + 1, self.col),
        }
    }

    fn row_label(self) -> char {
        ROW_IDS.chars().nth(usize::from(self.row)).unwrap_or('?')
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row_label(), self.col + 1)
    }
}

/// Direction a word or typing line runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A location that can hold exactly one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Slot {
    /// A cell on the 15×15 board.
    Board(Cell),
    /// A rack position, 1-based (`1..=RACK_SIZE`).
    Rack(u8),
}

impl Slot {
    /// Rack slot by 1-based index, or `None` when out of range.
    #[must_use]
    pub fn rack(index: u8) -> Option<Self> {
        (1..=RACK_SIZE).contains(&index).then_some(Self::Rack(index))
    }

    /// Board slot by 0-based row and column, or `None` when off the board.
    #[must_use]
    pub fn board(row: u8, col: u8) -> Option<Self> {
        Cell::new(row, col).map(Self::Board)
    }

    /// All rack slots, left to right.
    pub fn rack_slots() -> impl Iterator<Item = Self> {
        (1..=RACK_SIZE).map(Self::Rack)
    }

    #[must_use]
    pub fn is_rack(self) -> bool {
        matches!(self, Self::Rack(_))
    }

    #[must_use]
    pub fn is_board(self) -> bool {
        matches!(self, Self::Board(_))
    }

    /// The rack index, when this is a rack slot.
    #[must_use]
    pub fn rack_index(self) -> Option<u8> {
        match self {
            Self::Rack(i) => Some(i),
            Self::Board(_) => None,
        }
    }

    /// The board cell, when this is a board slot.
    #[must_use]
    pub fn cell(self) -> Option<Cell> {
        match self {
            Self::Board(cell) => Some(cell),
            Self::Rack(_) => None,
        }
    }

    /// Parse a slot id such as `"H8"` or `"R3"`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidId`] if the id names neither a board cell nor a rack slot.
    pub fn parse(id: &str) -> Result<Self, SlotError> {
        let invalid = || SlotError::InvalidId(id.to_owned());
        let mut chars = id.chars();
        let head = chars.next().ok_or_else(invalid)?;
        let number: u8 = chars.as_str().parse().map_err(|_| invalid())?;
        if head == 'R' {
            return Self::rack(number).ok_or_else(invalid);
        }
        let row = row_index(head).ok_or_else(invalid)?;
        let col = number.checked_sub(1).ok_or_else(invalid)?;
        Self::board(row, col).ok_or_else(invalid)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(cell) => cell.fmt(f),
            Self::Rack(i) => write!(f, "R{i}"),
        }
    }
}

impl From<Cell> for Slot {
    fn from(cell: Cell) -> Self {
        Self::Board(cell)
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for Slot {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl std::str::FromStr for Slot {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn row_index(label: char) -> Option<u8> {
    ROW_IDS.chars().zip(0u8..).find(|(c, _)| *c == label).map(|(_, i)| i)
}

/// The start cell and direction of a word as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCoord {
    pub start: Cell,
    pub orientation: Orientation,
}

impl MoveCoord {
    /// Parse a move coordinate: `"H8"` is horizontal from row H column 8,
    /// `"8H"` is vertical from the same cell.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::InvalidCoordinate`] if the string is not a cell in either order.
    pub fn parse(coord: &str) -> Result<Self, SlotError> {
        let invalid = || SlotError::InvalidCoordinate(coord.to_owned());
        let first = coord.chars().next().ok_or_else(invalid)?;
        let (row_label, digits, orientation) = if first.is_ascii_digit() {
            let last = coord.chars().last().ok_or_else(invalid)?;
            let digits = &coord[..coord.len() - last.len_utf8()];
            (last, digits, Orientation::Vertical)
        } else {
            (first, &coord[first.len_utf8()..], Orientation::Horizontal)
        };
        let row = row_index(row_label).ok_or_else(invalid)?;
        let col: u8 = digits.parse().map_err(|_| invalid())?;
        let start = col
            .checked_sub(1)
            .and_then(|c| Cell::new(row, c))
            .ok_or_else(invalid)?;
        Ok(Self { start, orientation })
    }

    /// Cells walked from the start, one per entry of `count`, stopping at the board edge.
    #[must_use]
    pub fn cells(self, count: usize) -> Vec<Cell> {
        let mut out = Vec::with_capacity(count);
        let mut next = Some(self.start);
        while out.len() < count {
            let Some(cell) = next else {
                break;
            };
            out.push(cell);
            next = cell.step(self.orientation);
        }
        out
    }
}
