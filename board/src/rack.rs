//! Rack rearrangement: making room for a drop and rescrambling.
//!
//! Dropping a tile onto an occupied rack slot shifts its neighbours toward
//! the nearest gap. The gap is searched to the right of the target first,
//! then to the left; when the rack is full the dragged tile's own slot is
//! the gap. Tiles between the gap and the target slide one slot toward the
//! gap, which frees the target.

#[cfg(test)]
#[path = "rack_test.rs"]
mod rack_test;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::RACK_SIZE;
use crate::slot::Slot;
use crate::store::{Tile, TileId, TileStore};

/// One tile moved by a rack rearrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub tile: TileId,
    pub from: Slot,
    pub to: Slot,
}

/// Nearest empty rack index to `ix`: rightward first, then leftward.
#[must_use]
pub fn nearest_gap(store: &TileStore, ix: u8) -> Option<u8> {
    let right = (ix + 1..=RACK_SIZE).find(|i| store.is_empty(Slot::Rack(*i)));
    right.or_else(|| (1..ix).rev().find(|i| store.is_empty(Slot::Rack(*i))))
}

/// Free rack slot `ix` for the dragged tile by shifting its neighbours.
///
/// Returns the shifts performed, in order. When the rack is full and the
/// dragged tile comes from the rack, its own slot becomes the gap: the tile
/// is lifted out, the neighbours shift, and the tile lands in `ix` (the last
/// shift in the result). Returns an empty list when `ix` is already empty or
/// no gap can be made.
pub fn make_room(store: &mut TileStore, ix: u8, dragged: TileId) -> Vec<Shift> {
    let target = Slot::Rack(ix);
    if store.is_empty(target) || store.slot_of(dragged) == Some(target) {
        return Vec::new();
    }
    let origin = store.slot_of(dragged);
    let (gap, lifted) = match nearest_gap(store, ix) {
        Some(gap) => (gap, None),
        None => {
            let Some(Slot::Rack(own)) = origin else {
                log::debug!("rack full; no room for drop at R{ix}");
                return Vec::new();
            };
            (own, store.remove(Slot::Rack(own)))
        }
    };

    let mut shifts = Vec::new();
    if gap > ix {
        for j in (ix + 1..=gap).rev() {
            shifts.extend(shift_one(store, j - 1, j));
        }
    } else {
        for j in gap..ix {
            shifts.extend(shift_one(store, j + 1, j));
        }
    }

    if let (Some(tile), Some(from)) = (lifted, origin) {
        shifts.extend(land(store, tile, from, target));
    }
    shifts
}

fn shift_one(store: &mut TileStore, from: u8, to: u8) -> Option<Shift> {
    let (from, to) = (Slot::Rack(from), Slot::Rack(to));
    let tile = store.get(from)?.id;
    match store.relocate(tile, to) {
        Ok(_) => Some(Shift { tile, from, to }),
        Err(e) => {
            log::warn!("rack shift {from} -> {to} failed: {e}");
            None
        }
    }
}

fn land(store: &mut TileStore, tile: Tile, from: Slot, to: Slot) -> Option<Shift> {
    let id = tile.id;
    match store.place(tile, to) {
        Ok(()) => Some(Shift { tile: id, from, to }),
        Err(e) => {
            log::warn!("lifted tile could not land on {to}: {e}");
            None
        }
    }
}

/// Randomly reorder the rack over all seven slots (gaps included).
pub fn rescramble<R: Rng + ?Sized>(store: &mut TileStore, rng: &mut R) -> Vec<Shift> {
    let mut contents: Vec<Option<Tile>> = Slot::rack_slots().map(|slot| store.remove(slot)).collect();
    let origins: Vec<Option<Slot>> = Slot::rack_slots()
        .zip(&contents)
        .map(|(slot, tile)| tile.as_ref().map(|_| slot))
        .collect();
    let mut order: Vec<usize> = (0..contents.len()).collect();
    order.shuffle(rng);

    let mut shifts = Vec::new();
    for (slot, &source) in Slot::rack_slots().zip(&order) {
        let Some(tile) = contents.get_mut(source).and_then(Option::take) else {
            continue;
        };
        let Some(from) = origins.get(source).copied().flatten() else {
            continue;
        };
        let id = tile.id;
        if let Err(e) = store.place(tile, slot) {
            log::warn!("rescramble could not place tile on {slot}: {e}");
            continue;
        }
        if from != slot {
            shifts.push(Shift { tile: id, from, to: slot });
        }
    }
    shifts
}
