//! Browser entry points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page creates one `GamePage` with its configuration blob, a view
//! facade (DOM updates, audio, dialogs) and the database facade. Everything
//! else runs through `GameSession`; this module only adapts callbacks,
//! timers and async requests to it.

use std::cell::RefCell;
use std::rc::Rc;

use board::engine::{Action, PlacementSummary};
use board::input::InputEvent;
use board::slot::Cell;
use board::store::RackLayout;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::net::api;
use crate::net::bridge::{Database, JsTransport};
use crate::net::channel::Channel;
use crate::session::{GameSession, Host, subscribe_game};
use crate::state::clock::{PlayerClock, TICK_MS};
use crate::state::movelist::MoveRecord;
use crate::util::rack_persistence;

#[wasm_bindgen]
extern "C" {
    /// Page-provided view facade.
    pub type View;

    #[wasm_bindgen(method)]
    fn render(this: &View, action_json: &str);
    #[wasm_bindgen(method, js_name = updateButtonState)]
    fn update_button_state(this: &View, summary_json: &str);
    #[wasm_bindgen(method, js_name = showMove)]
    fn show_move(this: &View, html: &str, index: usize);
    #[wasm_bindgen(method, js_name = showScores)]
    fn show_scores(this: &View, left: i32, right: i32);
    #[wasm_bindgen(method, js_name = showClock)]
    fn show_clock(this: &View, player: u8, text: &str, running_out: bool, blinking: bool);
    #[wasm_bindgen(method)]
    fn highlight(this: &View, cells_json: &str, color: u8, on: bool);
    #[wasm_bindgen(method, js_name = showCongrats)]
    fn show_congrats(this: &View);
    #[wasm_bindgen(method, js_name = playWinCue)]
    fn play_win_cue(this: &View);
    #[wasm_bindgen(method, js_name = revealShare)]
    fn reveal_share(this: &View);
    #[wasm_bindgen(method, js_name = lookupWord)]
    fn lookup_word(this: &View, word: &str);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {e}")));
    }
}

fn now_ms() -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    let now = js_sys::Date::now() as i64;
    now
}

fn encode<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value)
        .map_err(|e| log::error!("cannot encode for view: {e}"))
        .ok()
}

/// [`Host`] that forwards to the page's view facade and `localStorage`.
pub struct BrowserHost {
    game_id: String,
    view: View,
    shown_moves: usize,
}

impl Host for BrowserHost {
    fn save_tiles(&mut self, layout: &RackLayout) {
        rack_persistence::save_tiles(&self.game_id, layout);
    }

    fn load_tiles(&mut self) -> Option<RackLayout> {
        rack_persistence::load_tiles(&self.game_id)
    }

    fn clear_tiles(&mut self) {
        rack_persistence::clear_tiles(&self.game_id);
    }

    fn update_button_state(&mut self, summary: PlacementSummary) {
        if let Some(json) = encode(&summary) {
            self.view.update_button_state(&json);
        }
    }

    fn render(&mut self, action: &Action) {
        if let Some(json) = encode(action) {
            self.view.render(&json);
        }
    }

    fn show_move(&mut self, record: &MoveRecord) {
        self.view.show_move(&record.to_html(), self.shown_moves);
        self.shown_moves += 1;
    }

    fn show_scores(&mut self, [left, right]: [i32; 2]) {
        self.view.show_scores(left, right);
    }

    fn show_clock(&mut self, clock: &PlayerClock) {
        self.view.show_clock(clock.player(), &clock.text(), clock.running_out(), clock.blinking());
    }

    fn highlight(&mut self, cells: &[Cell], color: u8, on: bool) {
        let ids: Vec<String> = cells.iter().map(ToString::to_string).collect();
        if let Some(json) = encode(&ids) {
            self.view.highlight(&json, color, on);
        }
    }

    fn show_congrats(&mut self) {
        self.view.show_congrats();
    }

    fn play_win_cue(&mut self) {
        self.view.play_win_cue();
    }

    fn reveal_share(&mut self) {
        self.view.reveal_share();
    }

    fn lookup_word(&mut self, word: &str) {
        self.view.lookup_word(word);
    }
}

/// One game page, as seen from JavaScript.
#[wasm_bindgen]
pub struct GamePage {
    session: Rc<RefCell<GameSession<BrowserHost>>>,
    channel: Rc<Channel<JsTransport>>,
    clock: Rc<RefCell<Option<Interval>>>,
}

#[wasm_bindgen]
impl GamePage {
    /// # Errors
    ///
    /// Fails when the configuration blob is unusable.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, view: View, db: Database) -> Result<GamePage, JsValue> {
        let config = GameConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::set_max_level(config.log_level());
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let seed = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let host = BrowserHost { game_id: config.game_id.clone(), view, shown_moves: 0 };
        let session = Rc::new(RefCell::new(GameSession::new(config, host, seed)));
        let channel = Rc::new(Channel::new(Rc::new(JsTransport::new(db))));
        Ok(GamePage { session, channel, clock: Rc::new(RefCell::new(None)) })
    }

    /// Sign in, announce presence and start listening for game updates.
    pub fn connect(&self, token: String) {
        let channel = Rc::clone(&self.channel);
        let session = Rc::clone(&self.session);
        wasm_bindgen_futures::spawn_local(async move {
            channel.authenticate(&token).await;
            let user_id = session.borrow().config().user_id.clone();
            channel.announce_presence(&user_id);
            let (target, game_id) = (Rc::clone(&session), session.borrow().config().game_id.clone());
            // The callback runs while the session is borrowed; it must not borrow it.
            subscribe_game(&channel, session, now_ms, move || refresh_game(Rc::clone(&target), game_id.clone()));
        });
    }

    /// Fetch the full game state from the server and apply it.
    pub fn refresh(&self) {
        let game_id = self.session.borrow().config().game_id.clone();
        refresh_game(Rc::clone(&self.session), game_id);
    }

    /// Apply a server update given as JSON (the initial state, for example).
    ///
    /// # Errors
    ///
    /// Fails when the JSON is not a game update.
    #[wasm_bindgen(js_name = applyUpdate)]
    pub fn apply_update(&self, update_json: &str) -> Result<(), JsValue> {
        let update = serde_json::from_str(update_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.borrow_mut().apply_update(update, now_ms());
        Ok(())
    }

    /// Feed one input event, as JSON.
    ///
    /// # Errors
    ///
    /// Fails when the JSON is not an input event.
    pub fn handle(&self, event_json: &str) -> Result<(), JsValue> {
        let event: InputEvent = serde_json::from_str(event_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.session.borrow_mut().handle_input(event);
        Ok(())
    }

    /// Close the blank dialog; `None` cancels. `id` is the placement id of
    /// the `open_blank_dialog` action.
    ///
    /// # Errors
    ///
    /// Fails for a stale placement id or a letter outside the alphabet.
    #[wasm_bindgen(js_name = resolveBlank)]
    pub fn resolve_blank(&self, id: u32, letter: Option<String>) -> Result<(), JsValue> {
        self.session
            .borrow_mut()
            .resolve_blank_choice(id, letter.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = resetRack)]
    pub fn reset_rack(&self) {
        self.session.borrow_mut().reset_rack();
    }

    pub fn rescramble(&self) {
        self.session.borrow_mut().rescramble();
    }

    #[wasm_bindgen(js_name = highlightMove)]
    pub fn highlight_move(&self, index: usize, on: bool) {
        self.session.borrow_mut().highlight_move(index, on);
    }

    #[wasm_bindgen(js_name = clickMove)]
    pub fn click_move(&self, index: usize) {
        self.session.borrow_mut().click_move(index);
    }

    /// Submit the tiles placed this turn; the reply is applied when it arrives.
    pub fn submit(&self) {
        let (game_id, moves, mcount) = {
            let session = self.session.borrow();
            let Some(moves) = session.submission() else {
                log::debug!("nothing to submit");
                return;
            };
            (session.config().game_id.clone(), moves, session.moves().num_moves())
        };
        let session = Rc::clone(&self.session);
        wasm_bindgen_futures::spawn_local(async move {
            match api::submit_move(&game_id, &moves, mcount).await {
                Ok(reply) if reply.is_ok() => session.borrow_mut().apply_update(reply.update, now_ms()),
                Ok(reply) => log::warn!("move rejected by server: {}", reply.result),
                Err(e) => log::error!("move submission failed: {e}"),
            }
        });
    }

    /// Start the clock tick; it cancels itself once the game is over.
    #[wasm_bindgen(js_name = startClock)]
    pub fn start_clock(&self) {
        if self.clock.borrow().is_some() {
            return;
        }
        let session = Rc::clone(&self.session);
        let slot = Rc::clone(&self.clock);
        let interval = Interval::new(TICK_MS, move || {
            let running = session.try_borrow_mut().map_or(true, |mut s| s.tick(now_ms()));
            if !running {
                // The interval cannot be dropped from inside its own callback.
                let slot = Rc::clone(&slot);
                Timeout::new(0, move || drop(slot.borrow_mut().take())).forget();
            }
        });
        *self.clock.borrow_mut() = Some(interval);
    }
}

fn refresh_game(session: Rc<RefCell<GameSession<BrowserHost>>>, game_id: String) {
    wasm_bindgen_futures::spawn_local(async move {
        match api::fetch_game_state(&game_id).await {
            Ok(Some(update)) => session.borrow_mut().apply_update(update, now_ms()),
            Ok(None) => log::warn!("server refused game state for {game_id}"),
            Err(e) => log::error!("game state refresh failed: {e}"),
        }
    });
}
