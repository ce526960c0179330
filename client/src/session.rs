//! One game view: the placement engine plus the widgets around it.
//!
//! SYSTEM CONTEXT
//! ==============
//! `GameSession` is the single owner of everything a game page mutates. The
//! browser glue feeds it input events, clock ticks and server updates; it
//! answers by calling back into a [`Host`], which is the only place that
//! knows about the DOM, local storage or audio.
//!
//! DESIGN
//! ======
//! Engine actions that concern the host's collaborators (tile cache,
//! submit button) get dedicated `Host` methods. Purely visual actions go
//! through [`Host::render`] unchanged.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use board::blank::BlankOutcome;
use board::engine::{Action, EngineCore, PlacementError, PlacementSummary};
use board::input::InputEvent;
use board::slot::Cell;
use board::store::RackLayout;

use crate::config::GameConfig;
use crate::net::channel::{Channel, Transport};
use crate::net::types::GameUpdate;
use crate::state::clock::{GameClock, PlayerClock};
use crate::state::movelist::{MoveList, MoveRecord};
use crate::state::score::ScoreBoard;

/// Everything the session needs from the page.
pub trait Host {
    /// Cache the arrangement of the movable tiles.
    fn save_tiles(&mut self, layout: &RackLayout);
    /// The cached arrangement, if one exists.
    fn load_tiles(&mut self) -> Option<RackLayout>;
    fn clear_tiles(&mut self);
    /// Enable or disable submitting the current move.
    fn update_button_state(&mut self, summary: PlacementSummary);
    /// Apply a visual engine action.
    fn render(&mut self, action: &Action);
    fn show_move(&mut self, record: &MoveRecord);
    fn show_scores(&mut self, scores: [i32; 2]);
    fn show_clock(&mut self, clock: &PlayerClock);
    /// Toggle the highlight of a move's tiles; `color` is 0 local, 1 remote.
    fn highlight(&mut self, cells: &[Cell], color: u8, on: bool);
    /// The local player won.
    fn show_congrats(&mut self);
    fn play_win_cue(&mut self);
    fn reveal_share(&mut self);
    fn lookup_word(&mut self, word: &str);
}

/// State of one open game page.
pub struct GameSession<H: Host> {
    config: GameConfig,
    engine: EngineCore,
    moves: MoveList,
    scores: ScoreBoard,
    clock: Option<GameClock>,
    host: H,
    /// Until the first server update has been applied.
    initializing: bool,
}

impl<H: Host> GameSession<H> {
    /// `seed` drives rack rescrambling.
    #[must_use]
    pub fn new(config: GameConfig, host: H, seed: u64) -> Self {
        let engine = EngineCore::with_config(config.engine_config(seed));
        let moves = MoveList::new(config.local_player, config.zombie);
        Self { config, engine, moves, scores: ScoreBoard::new(), clock: None, host, initializing: true }
    }

    // --- Input ---

    /// Run one input event through the engine.
    pub fn handle_input(&mut self, event: InputEvent) {
        let actions = self.engine.handle(event);
        self.dispatch(actions);
    }

    /// Close the blank dialog with `outcome`.
    ///
    /// # Errors
    ///
    /// Returns the engine's error for a stale handle or an illegal letter;
    /// the dialog stays open in that case.
    pub fn resolve_blank(&mut self, id: u64, outcome: BlankOutcome) -> Result<(), PlacementError> {
        let actions = self.engine.resolve_placement(id, outcome)?;
        self.dispatch(actions);
        Ok(())
    }

    /// Close the blank dialog as the page reports it: the placement id from
    /// `OpenBlankDialog` and the chosen letter, `None` to cancel.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve_blank`].
    pub fn resolve_blank_choice(&mut self, id: u32, letter: Option<&str>) -> Result<(), PlacementError> {
        let outcome = match letter.and_then(|s| s.chars().next()) {
            Some(c) => BlankOutcome::Letter(c),
            None => BlankOutcome::Cancel,
        };
        self.resolve_blank(u64::from(id), outcome)
    }

    pub fn reset_rack(&mut self) {
        let actions = self.engine.reset_rack();
        self.dispatch(actions);
    }

    pub fn rescramble(&mut self) {
        let actions = self.engine.rescramble();
        self.dispatch(actions);
    }

    fn dispatch(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::SaveTiles { layout } => self.host.save_tiles(&layout),
                Action::UpdateButtonState { summary } => self.host.update_button_state(summary),
                other => self.host.render(&other),
            }
        }
    }

    // --- Server updates ---

    /// Apply a game update received at `now_ms`.
    pub fn apply_update(&mut self, update: GameUpdate, now_ms: i64) {
        let initializing = std::mem::replace(&mut self.initializing, false);
        if update.tiles.is_some() || update.rack.is_some() {
            let board = update.tiles.unwrap_or_default();
            let actions = self.engine.load(&board, update.rack.as_deref().unwrap_or_default());
            self.dispatch(actions);
            self.restore_cached_tiles();
        }
        for entry in &update.newmoves {
            let outcome = self.moves.append(entry, initializing);
            if let Some(record) = self.moves.records().last() {
                self.host.show_move(record);
            }
            if let Some(outcome) = outcome {
                if outcome.local_won {
                    self.host.show_congrats();
                }
                if outcome.play_cue {
                    self.host.play_win_cue();
                }
                self.host.reveal_share();
                self.host.clear_tiles();
            }
        }
        if let Some(scores) = update.scores {
            self.scores.set_scores(scores);
        }
        let over = update.over || self.moves.is_game_over();
        if let Some(info) = update.time_info.filter(|_| self.config.timed) {
            let clock = self.clock.get_or_insert_with(|| GameClock::new(info, update.tomove, now_ms));
            clock.reset(info, update.tomove, over, now_ms);
        } else if over {
            if let Some(clock) = &mut self.clock {
                clock.stop();
            }
        }
        if let Some(clock) = &self.clock {
            self.scores.set_penalties(clock.penalties());
        }
        self.show_clocks();
        self.host.show_scores(self.scores.displayed());
    }

    /// Put the movable tiles back where the player left them. A cache that no
    /// longer fits the position is overwritten with the fresh layout.
    fn restore_cached_tiles(&mut self) {
        let Some(layout) = self.host.load_tiles() else {
            return;
        };
        let actions = self.engine.restore_layout(&layout);
        if actions.is_empty() {
            self.host.save_tiles(&self.engine.store.layout());
            return;
        }
        self.dispatch(actions);
    }

    // --- Clock ---

    /// Advance the clocks to `now_ms`. Returns whether the tick should continue.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        let Some(clock) = &mut self.clock else {
            return false;
        };
        clock.tick(now_ms);
        let penalties = clock.penalties();
        let running = clock.is_running();
        self.show_clocks();
        if self.scores.set_penalties(penalties) || self.scores.has_penalty() {
            self.host.show_scores(self.scores.displayed());
        }
        running
    }

    fn show_clocks(&mut self) {
        if let Some(clock) = &self.clock {
            self.host.show_clock(clock.clock(0));
            self.host.show_clock(clock.clock(1));
        }
    }

    // --- Move list ---

    /// Highlight (or clear) the tiles of move `index` on the board.
    pub fn highlight_move(&mut self, index: usize, on: bool) {
        let Some(record) = self.moves.records().get(index) else {
            return;
        };
        let cells = record.highlight_cells();
        if !cells.is_empty() {
            self.host.highlight(&cells, record.highlight_color(), on);
        }
    }

    /// Look up the word of move `index`, when it is a placement.
    pub fn click_move(&mut self, index: usize) {
        if let Some(word) = self.moves.records().get(index).and_then(MoveRecord::lookup_word) {
            self.host.lookup_word(word);
        }
    }

    // --- Submission ---

    /// Move strings for the tiles placed this turn, or `None` when there is
    /// nothing to submit.
    #[must_use]
    pub fn submission(&self) -> Option<Vec<String>> {
        let summary = self.engine.summary();
        if summary.placed == 0 || summary.blank_pending || self.moves.is_game_over() {
            return None;
        }
        Some(self.engine.move_strings())
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    #[must_use]
    pub fn moves(&self) -> &MoveList {
        &self.moves
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    #[must_use]
    pub fn clock(&self) -> Option<&GameClock> {
        self.clock.as_ref()
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Feed updates from the game channel into `session`.
///
/// `now_ms` supplies the wall clock for each update. Payloads that are not
/// game updates are logged and dropped. An update that arrives while the
/// session is busy is dropped too, and `on_dropped` is called so the caller
/// can fetch the full state instead.
pub fn subscribe_game<T, H>(
    channel: &Channel<T>,
    session: Rc<RefCell<GameSession<H>>>,
    now_ms: impl Fn() -> i64 + 'static,
    on_dropped: impl Fn() + 'static,
) where
    T: Transport + 'static,
    H: Host + 'static,
{
    let path = session.borrow().config().game_channel();
    channel.subscribe(&path, move |value| match GameUpdate::from_value(value) {
        Ok(update) => match session.try_borrow_mut() {
            Ok(mut session) => session.apply_update(update, now_ms()),
            Err(_) => {
                log::warn!("game update arrived while the session was busy; refreshing");
                on_dropped();
            }
        },
        Err(e) => log::warn!("ignoring malformed game update: {e}"),
    });
}
