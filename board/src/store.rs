//! Tile model and the slot store.
//!
//! `TileStore` is the single owner of every tile on the rack and the board.
//! It keeps a forward map (slot → tile) and a reverse index (tile → slot) in
//! lockstep, so a tile occupies at most one slot and a slot holds at most one
//! tile after every call. All mutation goes through `place`, `remove` and
//! `relocate`; the engine never touches the maps directly.
//!
//! `RackLayout` is the serializable snapshot of the player's own tiles (rack
//! plus tentatively placed board tiles) that the host caches between page
//! loads.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::BLANK;
use crate::slot::{Cell, Slot};

/// Unique identifier for a tile.
pub type TileId = Uuid;

/// A single letter tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Letter printed on the tile, or [`BLANK`].
    pub symbol: char,
    /// Letter chosen for a blank tile placed on the board.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<char>,
    /// Committed by an earlier move; never draggable.
    #[serde(default)]
    pub fixed: bool,
}

impl Tile {
    /// A movable tile with a fresh id.
    #[must_use]
    pub fn new(symbol: char) -> Self {
        Self { id: Uuid::new_v4(), symbol, letter: None, fixed: false }
    }

    /// A tile committed by an earlier move.
    #[must_use]
    pub fn fixed(symbol: char, letter: Option<char>) -> Self {
        Self { id: Uuid::new_v4(), symbol, letter, fixed: true }
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.symbol == BLANK
    }

    /// The letter shown on the tile face.
    #[must_use]
    pub fn face(&self) -> char {
        self.letter.unwrap_or(self.symbol)
    }

    /// Tile as it appears in a submitted move: the symbol, or `?` plus the chosen letter.
    #[must_use]
    pub fn wire(&self) -> String {
        match (self.is_blank(), self.letter) {
            (true, Some(letter)) => format!("{BLANK}{letter}"),
            _ => self.symbol.to_string(),
        }
    }
}

/// Errors from store mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("slot {0} is occupied")]
    Occupied(Slot),
    #[error("slot {0} is empty")]
    Empty(Slot),
    #[error("tile {0} is not in the store")]
    UnknownTile(TileId),
    #[error("tile {0} is already placed")]
    DuplicateTile(TileId),
    #[error("cached layout does not match the current tiles")]
    LayoutMismatch,
}

/// One movable tile in a cached layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub slot: Slot,
    pub symbol: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<char>,
}

/// Positions of the player's movable tiles, as cached by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RackLayout {
    pub tiles: Vec<LayoutEntry>,
}

impl RackLayout {
    fn symbols(&self) -> Vec<char> {
        let mut symbols: Vec<char> = self.tiles.iter().map(|e| e.symbol).collect();
        symbols.sort_unstable();
        symbols
    }
}

/// In-memory store of tiles by slot.
#[derive(Debug, Clone, Default)]
pub struct TileStore {
    slots: HashMap<Slot, Tile>,
    index: HashMap<TileId, Slot>,
}

impl TileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Tile> {
        self.slots.get(&slot)
    }

    /// Whether `slot` holds no tile.
    #[must_use]
    pub fn is_empty(&self, slot: Slot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Where a tile currently sits.
    #[must_use]
    pub fn slot_of(&self, id: TileId) -> Option<Slot> {
        self.index.get(&id).copied()
    }

    /// Look up a tile by id.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.slot_of(id).and_then(|slot| self.slots.get(&slot))
    }

    /// Number of tiles in the store.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.slots.len()
    }

    /// Put a tile into an empty slot.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Occupied`] if the slot already holds a tile, or
    /// [`StoreError::DuplicateTile`] if the tile already sits elsewhere.
    pub fn place(&mut self, tile: Tile, slot: Slot) -> Result<(), StoreError> {
        if !self.is_empty(slot) {
            return Err(StoreError::Occupied(slot));
        }
        if self.index.contains_key(&tile.id) {
            return Err(StoreError::DuplicateTile(tile.id));
        }
        self.index.insert(tile.id, slot);
        self.slots.insert(slot, tile);
        Ok(())
    }

    /// Take the tile out of `slot`.
    pub fn remove(&mut self, slot: Slot) -> Option<Tile> {
        let tile = self.slots.remove(&slot)?;
        self.index.remove(&tile.id);
        Some(tile)
    }

    /// Move a tile to an empty slot, returning the slot it came from.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnknownTile`] if the tile is not in the store, or
    /// [`StoreError::Occupied`] if `target` holds another tile. The store is
    /// unchanged on error.
    pub fn relocate(&mut self, id: TileId, target: Slot) -> Result<Slot, StoreError> {
        let origin = self.slot_of(id).ok_or(StoreError::UnknownTile(id))?;
        if origin == target {
            return Ok(origin);
        }
        if !self.is_empty(target) {
            return Err(StoreError::Occupied(target));
        }
        let tile = self.remove(origin).ok_or(StoreError::Empty(origin))?;
        self.place(tile, target)?;
        Ok(origin)
    }

    /// Set or clear the chosen letter of the tile in `slot`. Returns false if the slot is empty.
    pub fn set_letter(&mut self, slot: Slot, letter: Option<char>) -> bool {
        let Some(tile) = self.slots.get_mut(&slot) else {
            return false;
        };
        tile.letter = letter;
        true
    }

    /// Leftmost empty rack index.
    #[must_use]
    pub fn first_empty_rack_slot(&self) -> Option<u8> {
        Slot::rack_slots()
            .find(|slot| self.is_empty(*slot))
            .and_then(Slot::rack_index)
    }

    /// Rack tiles, left to right, with their 1-based index.
    #[must_use]
    pub fn rack_tiles(&self) -> Vec<(u8, &Tile)> {
        Slot::rack_slots()
            .filter_map(|slot| Some((slot.rack_index()?, self.slots.get(&slot)?)))
            .collect()
    }

    /// Movable tiles sitting on the board, in row-major order.
    #[must_use]
    pub fn placed_tiles(&self) -> Vec<(Cell, &Tile)> {
        let mut placed: Vec<(Cell, &Tile)> = self
            .slots
            .iter()
            .filter(|(_, tile)| !tile.fixed)
            .filter_map(|(slot, tile)| Some((slot.cell()?, tile)))
            .collect();
        placed.sort_by_key(|(cell, _)| *cell);
        placed
    }

    /// Remove every tile.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    /// Snapshot of all movable tiles.
    #[must_use]
    pub fn layout(&self) -> RackLayout {
        let mut tiles: Vec<LayoutEntry> = self
            .slots
            .iter()
            .filter(|(_, tile)| !tile.fixed)
            .map(|(slot, tile)| LayoutEntry { slot: *slot, symbol: tile.symbol, letter: tile.letter })
            .collect();
        tiles.sort_by_key(|e| e.slot.to_string());
        RackLayout { tiles }
    }

    /// Rearrange the movable tiles to match a cached layout.
    ///
    /// Tiles keep their ids; each cached entry claims a current tile with the
    /// same symbol. Nothing changes unless the cached symbols are exactly the
    /// current movable tiles and every cached slot is free of fixed tiles.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::LayoutMismatch`] if the symbols differ, or
    /// [`StoreError::Occupied`] if a cached slot is taken by a fixed tile.
    pub fn apply_layout(&mut self, layout: &RackLayout) -> Result<(), StoreError> {
        if self.layout().symbols() != layout.symbols() {
            return Err(StoreError::LayoutMismatch);
        }
        let mut next = self.clone();
        let movable: Vec<Slot> = next.layout().tiles.iter().map(|e| e.slot).collect();
        let mut pool: Vec<Tile> = movable.into_iter().filter_map(|slot| next.remove(slot)).collect();
        for entry in &layout.tiles {
            let pos = pool
                .iter()
                .position(|t| t.symbol == entry.symbol)
                .ok_or(StoreError::LayoutMismatch)?;
            let mut tile = pool.swap_remove(pos);
            tile.letter = if tile.is_blank() && entry.slot.is_board() { entry.letter } else { None };
            next.place(tile, entry.slot)?;
        }
        *self = next;
        Ok(())
    }
}
