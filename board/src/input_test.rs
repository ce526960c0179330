use super::*;
use crate::slot::Cell;
use crate::store::TileStore;

// =============================================================
// Key
// =============================================================

#[test]
fn key_from_browser_names() {
    assert_eq!(Key::from_name("ArrowUp"), Some(Key::Up));
    assert_eq!(Key::from_name("ArrowLeft"), Some(Key::Left));
    assert_eq!(Key::from_name("Escape"), Some(Key::Escape));
    assert_eq!(Key::from_name("Backspace"), Some(Key::Backspace));
    assert_eq!(Key::from_name("q"), Some(Key::Char('q')));
}

#[test]
fn key_from_binding_names() {
    assert_eq!(Key::from_name("up"), Some(Key::Up));
    assert_eq!(Key::from_name("esc"), Some(Key::Escape));
    assert_eq!(Key::from_name("shift+q"), Some(Key::Char('Q')));
    assert_eq!(Key::from_name("shift+ð"), Some(Key::Char('Ð')));
}

#[test]
fn key_rejects_unknown_names() {
    assert_eq!(Key::from_name(""), None);
    assert_eq!(Key::from_name("Enter"), None);
    assert_eq!(Key::from_name("shift+"), None);
}

#[test]
fn key_serde_uses_names() {
    assert_eq!(serde_json::to_string(&Key::Down).unwrap(), "\"ArrowDown\"");
    let key: Key = serde_json::from_str("\"x\"").unwrap();
    assert_eq!(key, Key::Char('x'));
    assert!(serde_json::from_str::<Key>("\"Tab\"").is_err());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    let state = InputState::default();
    assert_eq!(state.mode(), InputMode::Idle);
    assert_eq!(state.selected(), None);
    assert_eq!(state.dragged(), None);
    assert!(state.typing().is_none());
    assert_eq!(state.key_map(), KeyMap::Default);
}

#[test]
fn dragging_and_selection_accessors() {
    let id = uuid::Uuid::new_v4();
    let dragging = InputState::Dragging { tile: id };
    assert_eq!(dragging.dragged(), Some(id));
    assert_eq!(dragging.selected(), None);
    let selected = InputState::SingleSelected { tile: id };
    assert_eq!(selected.selected(), Some(id));
    assert_eq!(selected.dragged(), None);
}

#[test]
fn typing_mode_follows_orientation() {
    let store = TileStore::new();
    let start = Cell { row: 0, col: 0 };
    let h = InputState::Typing(TypingLine::new(&store, start, Orientation::Horizontal));
    let v = InputState::Typing(TypingLine::new(&store, start, Orientation::Vertical));
    assert_eq!(h.mode(), InputMode::TypingHorizontal);
    assert_eq!(v.mode(), InputMode::TypingVertical);
    assert_eq!(h.key_map(), KeyMap::Typing);
}

#[test]
fn typing_mut_only_in_typing_state() {
    let mut idle = InputState::Idle;
    assert!(idle.typing_mut().is_none());
    let mut typing = InputState::Typing(TypingLine::new(
        &TileStore::new(),
        Cell { row: 3, col: 3 },
        Orientation::Horizontal,
    ));
    assert!(typing.typing_mut().is_some_and(|line| line.set_rack_index(4)));
    assert_eq!(typing.typing().map(TypingLine::rack_index), Some(4));
}
