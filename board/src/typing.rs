//! Typing line: keyboard placement of rack tiles along a row or column.
//!
//! Clicking an empty board cell starts a line of up to seven cells in one
//! direction, jumping over cells that already hold tiles. Two cursors move
//! independently: the line cursor counts cells filled so far, the rack
//! cursor points at the next rack slot to take a tile from (1..=7, with 8
//! meaning "past the end").

#[cfg(test)]
#[path = "typing_test.rs"]
mod typing_test;

use crate::consts::{RACK_CURSOR_SENTINEL, TYPING_LINE_MAX};
use crate::slot::{Cell, Orientation};
use crate::store::TileStore;

/// Enumerate up to `max` cells from `start` in `orientation`.
///
/// Stops at the board edge. With `jump_if_occupied`, cells holding a tile are
/// skipped and do not count toward `max`.
#[must_use]
pub fn enumerate_cells(
    store: &TileStore,
    start: Cell,
    orientation: Orientation,
    max: usize,
    jump_if_occupied: bool,
) -> Vec<Cell> {
    let mut cells = Vec::with_capacity(max);
    let mut next = Some(start);
    while cells.len() < max {
        let Some(cell) = next else {
            break;
        };
        if !(jump_if_occupied && !store.is_empty(cell.into())) {
            cells.push(cell);
        }
        next = cell.step(orientation);
    }
    cells
}

/// Active typing line and its two cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingLine {
    orientation: Orientation,
    cells: Vec<Cell>,
    filled: usize,
    rack_index: u8,
}

impl TypingLine {
    /// Start a line at `start`, skipping occupied cells.
    #[must_use]
    pub fn new(store: &TileStore, start: Cell, orientation: Orientation) -> Self {
        Self {
            orientation,
            cells: enumerate_cells(store, start, orientation, TYPING_LINE_MAX, true),
            filled: 0,
            rack_index: 1,
        }
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells of the line, in order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rack slot the next tile is taken from.
    #[must_use]
    pub fn rack_index(&self) -> u8 {
        self.rack_index
    }

    /// Move the rack cursor. Values outside `1..=8` are ignored; returns whether it moved.
    pub fn set_rack_index(&mut self, index: u8) -> bool {
        if !(1..=RACK_CURSOR_SENTINEL).contains(&index) {
            return false;
        }
        self.rack_index = index;
        true
    }

    /// Cell the next typed tile goes to.
    #[must_use]
    pub fn next_cell(&self) -> Option<Cell> {
        self.cells.get(self.filled).copied()
    }

    /// Cell filled most recently.
    #[must_use]
    pub fn last_filled(&self) -> Option<Cell> {
        self.filled.checked_sub(1).and_then(|i| self.cells.get(i)).copied()
    }

    /// Record that the next cell was filled.
    pub fn push(&mut self) {
        if self.filled < self.cells.len() {
            self.filled += 1;
        }
    }

    /// Record that the last filled cell was emptied.
    pub fn pop(&mut self) {
        self.filled = self.filled.saturating_sub(1);
    }
}
