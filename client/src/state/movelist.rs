//! Move history shown beside the board.
//!
//! DESIGN
//! ======
//! The list is append-only. Each appended move is classified, added to its
//! side's running total (floored at zero) and kept as a `MoveRecord` that
//! the host renders with [`MoveRecord::to_html`]. The `OVER` record decides
//! the winner; what to do about it is returned to the caller.

#[cfg(test)]
#[path = "movelist_test.rs"]
mod movelist_test;

use board::consts::BLANK;
use board::slot::{Cell, MoveCoord};

use crate::net::types::MoveEntry;
use crate::state::score::clamp_total;
use crate::util::html::escape_html;

/// What a move record represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Tiles laid on the board.
    Placement,
    Pass,
    /// Tiles swapped with the bag; only the count is shown.
    Exchange { count: usize },
    Resign,
    /// Overtime adjustment at the end of a timed game.
    Overtime,
    GameOver,
    /// Tiles left on a rack when the game ended.
    RackLeave,
}

impl MoveKind {
    /// Classify a server move from its coordinate and tiles.
    #[must_use]
    pub fn classify(coord: &str, tiles: &str) -> Self {
        if !coord.is_empty() {
            return Self::Placement;
        }
        match tiles {
            "PASS" => Self::Pass,
            "RSGN" => Self::Resign,
            "TIME" => Self::Overtime,
            "OVER" => Self::GameOver,
            _ => match tiles.strip_prefix("EXCH") {
                Some(rest) => Self::Exchange { count: rest.chars().skip(1).count() },
                None => Self::RackLeave,
            },
        }
    }

    /// Display text for a move of this kind.
    #[must_use]
    pub fn text(self, tiles: &str) -> String {
        match self {
            Self::Placement => tiles.chars().filter(|c| *c != BLANK).collect(),
            Self::Pass => "Pass".to_owned(),
            Self::Exchange { count: 1 } => "Exchanged 1 tile".to_owned(),
            Self::Exchange { count } => format!("Exchanged {count} tiles"),
            Self::Resign => "Resigned".to_owned(),
            Self::Overtime => "Overtime".to_owned(),
            Self::GameOver => "Game over".to_owned(),
            Self::RackLeave => tiles.to_owned(),
        }
    }

    fn word_class(self) -> &'static str {
        match self {
            Self::Placement | Self::RackLeave => "wordmove",
            Self::GameOver => "gameover",
            Self::Pass | Self::Exchange { .. } | Self::Resign | Self::Overtime => "othermove",
        }
    }
}

/// One rendered line of the move history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: u8,
    pub kind: MoveKind,
    /// Coordinate as sent by the server.
    pub coord: String,
    /// Tiles as sent by the server, blank markers included.
    pub tiles: String,
    pub text: String,
    pub score: i32,
    /// Running total of this player's side after the move.
    pub total: i32,
    /// Drawn with the local player's styling.
    pub local_side: bool,
}

impl MoveRecord {
    #[must_use]
    pub fn is_placement(&self) -> bool {
        self.kind == MoveKind::Placement
    }

    /// Word to look up when the record is clicked.
    #[must_use]
    pub fn lookup_word(&self) -> Option<&str> {
        self.is_placement().then_some(self.text.as_str())
    }

    /// Board cells covered by a placement, skipping blank markers.
    #[must_use]
    pub fn highlight_cells(&self) -> Vec<Cell> {
        if !self.is_placement() {
            return Vec::new();
        }
        match MoveCoord::parse(&self.coord) {
            Ok(coord) => coord.cells(self.tiles.chars().filter(|c| *c != BLANK).count()),
            Err(e) => {
                log::warn!("cannot highlight move: {e}");
                Vec::new()
            }
        }
    }

    /// Highlight class suffix for the board tiles: `0` local, `1` remote.
    #[must_use]
    pub fn highlight_color(&self) -> u8 {
        u8::from(!self.local_side)
    }

    /// Markup for the move list, all text escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let text = escape_html(&self.text);
        if self.kind == MoveKind::GameOver {
            return format!(
                r#"<div class="move gameover"><span class="gameovermsg">{text}</span><span class="statsbutton">Review</span></div>"#
            );
        }
        let (title, coord) = if self.is_placement() {
            (r#"title="Click to look up" "#, format!("({})", escape_html(&self.coord)))
        } else {
            ("", String::new())
        };
        let side = if self.player == 0 { "left" } else { "right" };
        let grad = if self.local_side { "humangrad" } else { "autoplayergrad" };
        let word_class = self.kind.word_class();
        let (score, total) = (self.score, self.total);
        if self.player == 0 {
            format!(
                r#"<div {title}class="move leftmove {grad}_{side}"><span class="total">{total}</span><span class="score">{score}</span><span class="{word_class}"><i>{text}</i> {coord}</span></div>"#
            )
        } else {
            format!(
                r#"<div {title}class="move rightmove {grad}_{side}"><span class="{word_class}">{coord} <i>{text}</i></span><span class="score">{score}</span><span class="total">{total}</span></div>"#
            )
        }
    }
}

/// Result of appending the `OVER` record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOverOutcome {
    /// Side with the strictly higher total; `None` on a tie.
    pub winner: Option<u8>,
    /// The viewing player won.
    pub local_won: bool,
    /// The congratulation cue should play now.
    pub play_cue: bool,
}

/// Move history plus running totals.
#[derive(Clone, Debug, Default)]
pub struct MoveList {
    local_player: Option<u8>,
    zombie: bool,
    totals: [i32; 2],
    records: Vec<MoveRecord>,
    num_tile_moves: usize,
    game_over: bool,
}

impl MoveList {
    /// `zombie` marks a game that was decided while the viewer was away.
    #[must_use]
    pub fn new(local_player: Option<u8>, zombie: bool) -> Self {
        Self { local_player, zombie, ..Self::default() }
    }

    /// Append one server move.
    ///
    /// `initializing` is set while replaying the history of a game being
    /// opened; a win found then only plays the cue for a zombie game.
    pub fn append(&mut self, entry: &MoveEntry, initializing: bool) -> Option<GameOverOutcome> {
        let side = usize::from(entry.player.min(1));
        let kind = MoveKind::classify(&entry.coord, &entry.tiles);
        self.totals[side] = clamp_total(self.totals[side], entry.score);
        let record = MoveRecord {
            player: entry.player.min(1),
            kind,
            coord: entry.coord.clone(),
            tiles: entry.tiles.clone(),
            text: kind.text(&entry.tiles),
            score: entry.score,
            total: self.totals[side],
            local_side: self.is_local_side(entry.player),
        };
        if record.is_placement() {
            self.num_tile_moves += 1;
        }
        self.records.push(record);
        (kind == MoveKind::GameOver).then(|| self.finish(initializing))
    }

    fn finish(&mut self, initializing: bool) -> GameOverOutcome {
        self.game_over = true;
        let [left, right] = self.totals;
        let winner = match left.cmp(&right) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        };
        let local_won = winner.is_some() && winner == self.local_player;
        let outcome = GameOverOutcome { winner, local_won, play_cue: local_won && (!initializing || self.zombie) };
        log::debug!("game over: {outcome:?}");
        outcome
    }

    fn is_local_side(&self, player: u8) -> bool {
        match self.local_player {
            Some(local) => local == player,
            None => player == 0,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    #[must_use]
    pub fn totals(&self) -> [i32; 2] {
        self.totals
    }

    #[must_use]
    pub fn num_moves(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn num_tile_moves(&self) -> usize {
        self.num_tile_moves
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}
