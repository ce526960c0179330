use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::blank::{Alphabet, BlankOutcome, PendingPlacement};
use crate::consts::{BLANK_FLASH_INTERVAL_MS, DRAG_OPACITY};
use crate::input::{DropTarget, InputEvent, InputMode, InputState, Key, KeyMap};
use crate::rack::{self, Shift};
use crate::slot::{Cell, Orientation, Slot};
use crate::store::{LayoutEntry, RackLayout, Tile, TileId, TileStore};
use crate::typing::TypingLine;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    TileMoved { tile: TileId, from: Slot, to: Slot },
    SetTileLetter { tile: TileId, letter: Option<char> },
    SetTileVisible { tile: TileId, visible: bool },
    SetTileOpacity { tile: TileId, opacity: f64 },
    SelectionChanged { tile: Option<TileId> },
    /// Empty board cells should (not) accept click-to-place.
    DropTargetsArmed { armed: bool },
    /// Typing line markers; an empty list clears them.
    TypingLineChanged { cells: Vec<Slot>, orientation: Option<Orientation> },
    TypingCursorChanged { rack_index: u8 },
    OpenBlankDialog { placement: PendingPlacement, rows: Vec<Vec<char>> },
    CloseBlankDialog,
    StartFlash { slot: Slot, interval_ms: u32 },
    StopFlash { slot: Slot },
    BindKeys { keys: KeyMap },
    /// Cache the movable tiles for this game.
    SaveTiles { layout: RackLayout },
    /// Recompute whether the move can be submitted.
    UpdateButtonState { summary: PlacementSummary },
    RenderNeeded,
}

/// What the host needs to decide whether the submit button is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementSummary {
    /// Movable tiles on the board.
    pub placed: usize,
    /// Tiles left on the rack.
    pub on_rack: usize,
    /// A blank letter choice is open.
    pub blank_pending: bool,
}

/// Errors from resolving a blank placement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("no blank placement with id {0} is open")]
    StaleHandle(u64),
    #[error("{0:?} is not a legal letter")]
    IllegalLetter(char),
}

/// Engine tuning supplied by the host.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub alphabet: Alphabet,
    /// Seed for rack rescrambling.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { alphabet: Alphabet::default(), seed: 0 }
    }
}

/// Core engine state: everything that does not need the browser.
///
/// The host feeds it events and carries out the returned actions.
pub struct EngineCore {
    pub store: TileStore,
    pub input: InputState,
    pending: Option<PendingPlacement>,
    next_placement: u64,
    alphabet: Alphabet,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            store: TileStore::new(),
            input: InputState::Idle,
            pending: None,
            next_placement: 1,
            alphabet: config.alphabet,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    // --- Data inputs ---

    /// Replace the position: committed board tiles plus the player's rack.
    ///
    /// An open blank dialog is cancelled and any drag, selection or typing
    /// line is dropped first.
    pub fn load(&mut self, board: &[LayoutEntry], rack: &str) -> Vec<Action> {
        let mut actions = self.abandon_placement();
        actions.extend(self.set_state(InputState::Idle));
        self.store.clear();
        for entry in board {
            let tile = Tile::fixed(entry.symbol, entry.letter);
            if let Err(e) = self.store.place(tile, entry.slot) {
                log::warn!("skipping board tile at {}: {e}", entry.slot);
            }
        }
        for (slot, symbol) in Slot::rack_slots().zip(rack.chars()) {
            if let Err(e) = self.store.place(Tile::new(symbol), slot) {
                log::warn!("skipping rack tile at {slot}: {e}");
            }
        }
        actions.extend([self.button_state(), Action::BindKeys { keys: KeyMap::Default }, Action::RenderNeeded]);
        actions
    }

    /// Rearrange the movable tiles from a cached layout. Mismatched caches are ignored.
    pub fn restore_layout(&mut self, layout: &RackLayout) -> Vec<Action> {
        if self.pending.is_some() {
            return Vec::new();
        }
        if let Err(e) = self.store.apply_layout(layout) {
            log::warn!("ignoring cached tile layout: {e}");
            return Vec::new();
        }
        let mut actions = self.set_state(InputState::Idle);
        actions.push(self.button_state());
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Feed one host input event through the state machine.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { tile } => self.start_drag(tile),
            InputEvent::PointerDrop { target } => self.drop_tile(target),
            InputEvent::PointerUp => self.end_drag(),
            InputEvent::TileClick { tile } => self.select_tile(Some(tile)),
            InputEvent::CellClick { slot } => self.click_cell(slot),
            InputEvent::KeyPress { key } => self.key_press(key),
        }
    }

    // --- Moves ---

    /// Move a tile to an empty slot.
    ///
    /// A blank moving onto the board is deferred: the blank dialog opens and
    /// the move completes in [`Self::resolve_placement`]. A blank returning to
    /// the rack loses its letter.
    pub fn move_tile(&mut self, tile: TileId, target: Slot) -> Vec<Action> {
        if self.pending.is_some() {
            log::debug!("move ignored while blank dialog is open");
            return Vec::new();
        }
        let Some(origin) = self.store.slot_of(tile) else {
            log::debug!("move rejected: unknown tile {tile}");
            return Vec::new();
        };
        if !self.is_movable(tile) || origin == target || !self.store.is_empty(target) {
            log::debug!("move rejected: {origin} -> {target}");
            return Vec::new();
        }
        let is_blank = self.store.tile(tile).is_some_and(Tile::is_blank);
        if is_blank && target.is_board() {
            return self.begin_placement(tile, origin, target);
        }
        self.complete_move(tile, target)
    }

    fn complete_move(&mut self, tile: TileId, target: Slot) -> Vec<Action> {
        let from = match self.store.relocate(tile, target) {
            Ok(from) => from,
            Err(e) => {
                log::debug!("move rejected: {e}");
                return Vec::new();
            }
        };
        let mut actions = vec![Action::TileMoved { tile, from, to: target }];
        actions.extend(self.clear_letter_on_rack(tile, target));
        actions.extend(self.after_move());
        actions
    }

    fn clear_letter_on_rack(&mut self, tile: TileId, slot: Slot) -> Option<Action> {
        let has_letter = self.store.tile(tile).is_some_and(|t| t.letter.is_some());
        if slot.is_rack() && has_letter && self.store.set_letter(slot, None) {
            return Some(Action::SetTileLetter { tile, letter: None });
        }
        None
    }

    fn after_move(&self) -> Vec<Action> {
        vec![
            Action::SaveTiles { layout: self.store.layout() },
            self.button_state(),
            Action::RenderNeeded,
        ]
    }

    fn button_state(&self) -> Action {
        Action::UpdateButtonState { summary: self.summary() }
    }

    fn shift_actions(&mut self, shifts: &[Shift]) -> Vec<Action> {
        let mut actions = Vec::new();
        for shift in shifts {
            actions.push(Action::TileMoved { tile: shift.tile, from: shift.from, to: shift.to });
            actions.extend(self.clear_letter_on_rack(shift.tile, shift.to));
        }
        actions
    }

    // --- Blank placement ---

    /// Open the blank dialog for moving `tile` to `target`.
    fn begin_placement(&mut self, tile: TileId, origin: Slot, target: Slot) -> Vec<Action> {
        let placement = PendingPlacement { id: self.next_placement, tile, origin, target };
        self.next_placement += 1;
        self.pending = Some(placement.clone());
        log::debug!("blank placement {} opened for {target}", placement.id);
        vec![
            Action::SetTileVisible { tile, visible: false },
            Action::OpenBlankDialog { placement, rows: self.alphabet.rows() },
            Action::StartFlash { slot: target, interval_ms: BLANK_FLASH_INTERVAL_MS },
            Action::BindKeys { keys: KeyMap::BlankDialog },
            self.button_state(),
        ]
    }

    /// Finish an open blank placement.
    ///
    /// With a letter the tile moves to the target carrying that letter; on
    /// cancel it stays where it was. Either way the flash stops, the tile is
    /// shown again and the normal key bindings return.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::StaleHandle`] if `id` is not the open
    /// placement, or [`PlacementError::IllegalLetter`] for a letter outside the
    /// alphabet. The placement stays open on error.
    pub fn resolve_placement(&mut self, id: u64, outcome: BlankOutcome) -> Result<Vec<Action>, PlacementError> {
        if self.pending.as_ref().map(|p| p.id) != Some(id) {
            return Err(PlacementError::StaleHandle(id));
        }
        let outcome = match outcome {
            BlankOutcome::Letter(c) => {
                BlankOutcome::Letter(self.alphabet.canonical(c).ok_or(PlacementError::IllegalLetter(c))?)
            }
            BlankOutcome::Cancel => BlankOutcome::Cancel,
        };
        let Some(placement) = self.pending.take() else {
            return Err(PlacementError::StaleHandle(id));
        };
        let PendingPlacement { tile, target, .. } = placement;

        let mut actions = vec![
            Action::StopFlash { slot: target },
            Action::CloseBlankDialog,
            Action::SetTileVisible { tile, visible: true },
            Action::BindKeys { keys: self.input.key_map() },
        ];
        match outcome {
            BlankOutcome::Letter(letter) => match self.store.relocate(tile, target) {
                Ok(from) => {
                    self.store.set_letter(target, Some(letter));
                    actions.push(Action::TileMoved { tile, from, to: target });
                    actions.push(Action::SetTileLetter { tile, letter: Some(letter) });
                }
                Err(e) => {
                    log::warn!("blank placement {id} abandoned: {e}");
                    actions.extend(self.rollback_typing(target));
                }
            },
            BlankOutcome::Cancel => actions.extend(self.rollback_typing(target)),
        }
        actions.extend(self.after_move());
        Ok(actions)
    }

    /// The open blank placement, if any.
    #[must_use]
    pub fn pending_placement(&self) -> Option<&PendingPlacement> {
        self.pending.as_ref()
    }

    /// Close the blank dialog without moving anything.
    fn abandon_placement(&mut self) -> Vec<Action> {
        let Some(PendingPlacement { id, tile, target, .. }) = self.pending.take() else {
            return Vec::new();
        };
        log::debug!("blank placement {id} abandoned");
        vec![
            Action::StopFlash { slot: target },
            Action::CloseBlankDialog,
            Action::SetTileVisible { tile, visible: true },
        ]
    }

    fn rollback_typing(&mut self, target: Slot) -> Vec<Action> {
        let Some(line) = self.input.typing_mut() else {
            return Vec::new();
        };
        if line.last_filled().map(Slot::Board) != Some(target) {
            return Vec::new();
        }
        line.pop();
        let index = line.rack_index().saturating_sub(1).max(1);
        line.set_rack_index(index);
        vec![Action::TypingCursorChanged { rack_index: index }]
    }

    // --- Drag and drop ---

    fn start_drag(&mut self, tile: TileId) -> Vec<Action> {
        if self.pending.is_some() || !self.is_movable(tile) {
            return Vec::new();
        }
        let mut actions = self.set_state(InputState::Dragging { tile });
        actions.push(Action::SetTileOpacity { tile, opacity: DRAG_OPACITY });
        actions
    }

    fn end_drag(&mut self) -> Vec<Action> {
        if self.input.dragged().is_none() {
            return Vec::new();
        }
        self.set_state(InputState::Idle)
    }

    /// Drop the dragged tile on `target`.
    ///
    /// The background redirects to the first empty rack slot; an occupied rack
    /// slot makes room by shifting its neighbours. Drops that still land on an
    /// occupied slot are abandoned.
    pub fn drop_tile(&mut self, target: DropTarget) -> Vec<Action> {
        let Some(tile) = self.input.dragged() else {
            return Vec::new();
        };
        let mut actions = self.set_state(InputState::Idle);
        let target = match target {
            DropTarget::Slot(slot) => slot,
            DropTarget::Background => match self.store.first_empty_rack_slot() {
                Some(i) => Slot::Rack(i),
                None => {
                    log::debug!("drop on background ignored: rack full");
                    return actions;
                }
            },
        };

        if let Slot::Rack(ix) = target {
            let shifts = rack::make_room(&mut self.store, ix, tile);
            let landed = self.store.slot_of(tile) == Some(target) && !shifts.is_empty();
            actions.extend(self.shift_actions(&shifts));
            if landed {
                actions.extend(self.after_move());
                return actions;
            }
        }

        if self.store.is_empty(target) {
            actions.extend(self.move_tile(tile, target));
        } else {
            log::debug!("drop on occupied {target} abandoned");
        }
        actions
    }

    // --- Click to place ---

    /// Toggle click-to-place selection. `None` (or the selected tile) deselects.
    pub fn select_tile(&mut self, tile: Option<TileId>) -> Vec<Action> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let current = self.input.selected();
        match tile {
            Some(tile) if current != Some(tile) => {
                if !self.is_movable(tile) {
                    return Vec::new();
                }
                let mut actions = self.set_state(InputState::SingleSelected { tile });
                actions.push(Action::SelectionChanged { tile: Some(tile) });
                actions.push(Action::DropTargetsArmed { armed: true });
                actions
            }
            _ if current.is_some() => self.set_state(InputState::Idle),
            _ => Vec::new(),
        }
    }

    /// Click on an empty board cell: place the selected tile, or cycle the typing line.
    fn click_cell(&mut self, slot: Slot) -> Vec<Action> {
        if self.pending.is_some() || !slot.is_board() || !self.store.is_empty(slot) {
            return Vec::new();
        }
        if let Some(tile) = self.input.selected() {
            let mut actions = self.set_state(InputState::Idle);
            actions.extend(self.move_tile(tile, slot));
            return actions;
        }
        let Some(cell) = slot.cell() else {
            return Vec::new();
        };
        match self.input.mode() {
            InputMode::Idle => self.enter_typing_mode(cell, Orientation::Horizontal),
            InputMode::TypingHorizontal => self.enter_typing_mode(cell, Orientation::Vertical),
            InputMode::TypingVertical => self.exit_typing_mode(),
            InputMode::Dragging | InputMode::SingleSelected => Vec::new(),
        }
    }

    // --- Typing mode ---

    /// Start a typing line at `start`.
    pub fn enter_typing_mode(&mut self, start: Cell, orientation: Orientation) -> Vec<Action> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let line = TypingLine::new(&self.store, start, orientation);
        let cells = line.cells().iter().copied().map(Slot::Board).collect();
        let rack_index = line.rack_index();
        let mut actions = self.set_state(InputState::Typing(line));
        actions.push(Action::TypingLineChanged { cells, orientation: Some(orientation) });
        actions.push(Action::TypingCursorChanged { rack_index });
        actions.push(Action::BindKeys { keys: KeyMap::Typing });
        actions
    }

    /// Leave typing mode; placed tiles stay where they are.
    pub fn exit_typing_mode(&mut self) -> Vec<Action> {
        if self.input.typing().is_none() {
            return Vec::new();
        }
        self.set_state(InputState::Idle)
    }

    /// Move the rack tile under the cursor to the next line cell, then advance the cursor.
    pub fn typing_advance(&mut self) -> Vec<Action> {
        let Some(line) = self.input.typing() else {
            return Vec::new();
        };
        let index = line.rack_index();
        let next = line.next_cell();
        let source = Slot::rack(index).and_then(|slot| self.store.get(slot)).map(|t| t.id);

        let mut actions = Vec::new();
        if let (Some(tile), Some(cell)) = (source, next) {
            let moved = self.move_tile(tile, Slot::Board(cell));
            if !moved.is_empty() {
                if let Some(line) = self.input.typing_mut() {
                    line.push();
                }
            }
            actions.extend(moved);
        }
        actions.extend(self.set_typing_rack_index(index.saturating_add(1)));
        actions
    }

    /// Step the rack cursor back and return the last typed tile to that rack slot.
    pub fn typing_retreat(&mut self) -> Vec<Action> {
        let Some(line) = self.input.typing() else {
            return Vec::new();
        };
        let Some(cell) = line.last_filled() else {
            return Vec::new();
        };
        let back = line.rack_index().saturating_sub(1).max(1);
        let Some(tile) = self.store.get(Slot::Board(cell)).map(|t| t.id) else {
            return Vec::new();
        };
        let target = if self.store.is_empty(Slot::Rack(back)) {
            Slot::Rack(back)
        } else {
            match self.store.first_empty_rack_slot() {
                Some(i) => Slot::Rack(i),
                None => return Vec::new(),
            }
        };

        let mut actions = self.move_tile(tile, target);
        if !actions.is_empty() {
            if let Some(line) = self.input.typing_mut() {
                line.pop();
            }
        }
        actions.extend(self.set_typing_rack_index(back));
        actions
    }

    /// Move the typing rack cursor. Ignored outside `1..=8` or outside typing mode.
    pub fn set_typing_rack_index(&mut self, index: u8) -> Vec<Action> {
        if let Some(line) = self.input.typing_mut() {
            if line.set_rack_index(index) {
                return vec![Action::TypingCursorChanged { rack_index: index }];
            }
        }
        Vec::new()
    }

    // --- Keyboard ---

    fn key_press(&mut self, key: Key) -> Vec<Action> {
        if let Some(id) = self.pending.as_ref().map(|p| p.id) {
            let Some(outcome) = self.alphabet.outcome_for_key(key) else {
                return Vec::new();
            };
            return match self.resolve_placement(id, outcome) {
                Ok(actions) => actions,
                Err(e) => {
                    log::warn!("blank dialog key ignored: {e}");
                    Vec::new()
                }
            };
        }
        if let Some(line) = self.input.typing() {
            let index = line.rack_index();
            return match key {
                Key::Up => self.typing_advance(),
                Key::Down => self.typing_retreat(),
                Key::Left => self.set_typing_rack_index(index.saturating_sub(1)),
                Key::Right => self.set_typing_rack_index(index.saturating_add(1)),
                Key::Escape => self.exit_typing_mode(),
                Key::Backspace | Key::Char(_) => Vec::new(),
            };
        }
        match key {
            Key::Escape => self.reset_rack(),
            Key::Backspace => self.rescramble(),
            _ => Vec::new(),
        }
    }

    // --- Rack ---

    /// Return every movable board tile to the rack, leftmost gaps first.
    pub fn reset_rack(&mut self) -> Vec<Action> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let mut actions = self.set_state(InputState::Idle);
        let returned = self.return_placed_tiles();
        if !returned.is_empty() {
            actions.extend(returned);
            actions.extend(self.after_move());
        }
        actions
    }

    /// Reset the rack, then shuffle it randomly.
    pub fn rescramble(&mut self) -> Vec<Action> {
        if self.pending.is_some() {
            return Vec::new();
        }
        let mut actions = self.set_state(InputState::Idle);
        actions.extend(self.return_placed_tiles());
        let shifts = rack::rescramble(&mut self.store, &mut self.rng);
        actions.extend(self.shift_actions(&shifts));
        actions.extend(self.after_move());
        actions
    }

    fn return_placed_tiles(&mut self) -> Vec<Action> {
        let placed: Vec<TileId> = self.store.placed_tiles().iter().map(|(_, t)| t.id).collect();
        let mut actions = Vec::new();
        for tile in placed {
            let Some(i) = self.store.first_empty_rack_slot() else {
                log::warn!("rack full while resetting; tile {tile} left on board");
                break;
            };
            match self.store.relocate(tile, Slot::Rack(i)) {
                Ok(from) => {
                    actions.push(Action::TileMoved { tile, from, to: Slot::Rack(i) });
                    actions.extend(self.clear_letter_on_rack(tile, Slot::Rack(i)));
                }
                Err(e) => log::warn!("reset rack: {e}"),
            }
        }
        actions
    }

    // --- State transitions ---

    /// Switch interaction state, emitting what the old state leaves behind.
    fn set_state(&mut self, next: InputState) -> Vec<Action> {
        let previous = std::mem::replace(&mut self.input, next);
        log::debug!("input {:?} -> {:?}", previous.mode(), self.input.mode());
        let mut actions = Vec::new();
        if let Some(tile) = previous.dragged() {
            actions.push(Action::SetTileOpacity { tile, opacity: 1.0 });
        }
        if previous.selected().is_some() && self.input.selected().is_none() {
            actions.push(Action::SelectionChanged { tile: None });
            actions.push(Action::DropTargetsArmed { armed: false });
        }
        if previous.typing().is_some() && self.input.typing().is_none() {
            actions.push(Action::TypingLineChanged { cells: Vec::new(), orientation: None });
            actions.push(Action::BindKeys { keys: KeyMap::Default });
        }
        actions
    }

    fn is_movable(&self, tile: TileId) -> bool {
        self.store.tile(tile).is_some_and(|t| !t.fixed)
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> InputMode {
        self.input.mode()
    }

    /// The click-to-place selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<TileId> {
        self.input.selected()
    }

    /// The tile being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<TileId> {
        self.input.dragged()
    }

    #[must_use]
    pub fn typing_line(&self) -> Option<&TypingLine> {
        self.input.typing()
    }

    #[must_use]
    pub fn summary(&self) -> PlacementSummary {
        PlacementSummary {
            placed: self.store.placed_tiles().len(),
            on_rack: self.store.rack_tiles().len(),
            blank_pending: self.pending.is_some(),
        }
    }

    /// Tentative tiles in submit format: `"H8=A"`, blanks as `"H9=?E"`.
    #[must_use]
    pub fn move_strings(&self) -> Vec<String> {
        self.store
            .placed_tiles()
            .into_iter()
            .map(|(cell, tile)| format!("{cell}={}", tile.wire()))
            .collect()
    }
}
