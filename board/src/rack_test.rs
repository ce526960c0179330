use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::slot::Cell;

// =============================================================
// Helpers
// =============================================================

/// Rack with a tile named after its slot in each listed index.
fn rack_with(indexes: &[u8]) -> TileStore {
    let mut store = TileStore::new();
    for &i in indexes {
        let symbol = char::from(b'0' + i);
        store.place(Tile::new(symbol), Slot::Rack(i)).unwrap();
    }
    store
}

fn symbol_at(store: &TileStore, i: u8) -> Option<char> {
    store.get(Slot::Rack(i)).map(|t| t.symbol)
}

fn id_at(store: &TileStore, i: u8) -> TileId {
    store.get(Slot::Rack(i)).unwrap().id
}

fn rack_symbols(store: &TileStore) -> Vec<Option<char>> {
    (1..=7).map(|i| symbol_at(store, i)).collect()
}

// =============================================================
// nearest_gap
// =============================================================

#[test]
fn gap_search_prefers_right() {
    let store = rack_with(&[1, 2, 3, 5, 7]);
    assert_eq!(nearest_gap(&store, 2), Some(4));
    assert_eq!(nearest_gap(&store, 5), Some(6));
}

#[test]
fn gap_search_falls_back_left() {
    let store = rack_with(&[2, 3, 4, 5, 6, 7]);
    assert_eq!(nearest_gap(&store, 6), Some(1));
}

#[test]
fn gap_search_full_rack() {
    let store = rack_with(&[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(nearest_gap(&store, 4), None);
}

// =============================================================
// make_room
// =============================================================

#[test]
fn make_room_shifts_right_toward_gap() {
    // Occupied {1,2,3,5,7}; drop on 2 coming from 5.
    let mut store = rack_with(&[1, 2, 3, 5, 7]);
    let dragged = id_at(&store, 5);
    let shifts = make_room(&mut store, 2, dragged);
    assert_eq!(shifts.len(), 2);
    assert_eq!(shifts[0].from, Slot::Rack(3));
    assert_eq!(shifts[0].to, Slot::Rack(4));
    assert_eq!(shifts[1].from, Slot::Rack(2));
    assert_eq!(shifts[1].to, Slot::Rack(3));
    assert!(store.is_empty(Slot::Rack(2)));

    store.relocate(dragged, Slot::Rack(2)).unwrap();
    assert_eq!(
        rack_symbols(&store),
        vec![Some('1'), Some('5'), Some('2'), Some('3'), None, None, Some('7')]
    );
    assert_eq!(store.tile_count(), 5);
}

#[test]
fn make_room_shifts_left_when_no_gap_to_the_right() {
    let mut store = rack_with(&[2, 3, 4, 5, 6, 7]);
    let board_tile = Tile::new('B');
    let dragged = board_tile.id;
    store.place(board_tile, Slot::Board(Cell { row: 7, col: 7 })).unwrap();

    let shifts = make_room(&mut store, 4, dragged);
    assert_eq!(shifts.len(), 3);
    assert!(store.is_empty(Slot::Rack(4)));
    assert_eq!(rack_symbols(&store)[..3], [Some('2'), Some('3'), Some('4')]);
}

#[test]
fn make_room_full_rack_uses_dragged_tiles_slot() {
    let mut store = rack_with(&[1, 2, 3, 4, 5, 6, 7]);
    let dragged = id_at(&store, 6);
    let shifts = make_room(&mut store, 2, dragged);
    assert_eq!(shifts.last().map(|s| s.tile), Some(dragged));
    assert_eq!(store.slot_of(dragged), Some(Slot::Rack(2)));
    assert_eq!(
        rack_symbols(&store),
        vec![Some('1'), Some('6'), Some('2'), Some('3'), Some('4'), Some('5'), Some('7')]
    );
    assert_eq!(store.tile_count(), 7);
}

#[test]
fn make_room_full_rack_from_board_is_noop() {
    let mut store = rack_with(&[1, 2, 3, 4, 5, 6, 7]);
    let tile = Tile::new('Z');
    let dragged = tile.id;
    store.place(tile, Slot::Board(Cell { row: 0, col: 0 })).unwrap();
    let before = rack_symbols(&store);
    assert!(make_room(&mut store, 3, dragged).is_empty());
    assert_eq!(rack_symbols(&store), before);
}

#[test]
fn make_room_empty_target_is_noop() {
    let mut store = rack_with(&[1, 3]);
    let dragged = id_at(&store, 1);
    assert!(make_room(&mut store, 2, dragged).is_empty());
}

#[test]
fn make_room_never_exceeds_rack_size_moves() {
    for target in 1..=7 {
        for own in 1..=7 {
            let mut store = rack_with(&[1, 2, 3, 4, 5, 6, 7]);
            let dragged = id_at(&store, own);
            let shifts = make_room(&mut store, target, dragged);
            assert!(shifts.len() <= 7);
            assert_eq!(store.tile_count(), 7);
            assert_eq!(store.slot_of(dragged).map(|s| s.is_rack()), Some(true));
        }
    }
}

// =============================================================
// rescramble
// =============================================================

#[test]
fn rescramble_keeps_every_tile() {
    let mut store = rack_with(&[1, 2, 4, 7]);
    let mut rng = StdRng::seed_from_u64(7);
    let shifts = rescramble(&mut store, &mut rng);
    assert_eq!(store.tile_count(), 4);
    let mut symbols: Vec<char> = rack_symbols(&store).into_iter().flatten().collect();
    symbols.sort_unstable();
    assert_eq!(symbols, vec!['1', '2', '4', '7']);
    for shift in shifts {
        assert_eq!(store.slot_of(shift.tile), Some(shift.to));
        assert_ne!(shift.from, shift.to);
    }
}

#[test]
fn rescramble_is_deterministic_for_a_seed() {
    let mut a = rack_with(&[1, 2, 3, 4, 5]);
    let mut b = a.clone();
    rescramble(&mut a, &mut StdRng::seed_from_u64(42));
    rescramble(&mut b, &mut StdRng::seed_from_u64(42));
    assert_eq!(rack_symbols(&a), rack_symbols(&b));
}
