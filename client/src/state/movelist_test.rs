use super::*;

fn mv(player: u8, coord: &str, tiles: &str, score: i32) -> MoveEntry {
    MoveEntry::new(player, coord, tiles, score)
}

// =============================================================
// Classification
// =============================================================

#[test]
fn classifies_keyword_moves() {
    assert_eq!(MoveKind::classify("", "PASS"), MoveKind::Pass);
    assert_eq!(MoveKind::classify("", "RSGN"), MoveKind::Resign);
    assert_eq!(MoveKind::classify("", "TIME"), MoveKind::Overtime);
    assert_eq!(MoveKind::classify("", "OVER"), MoveKind::GameOver);
    assert_eq!(MoveKind::classify("", "EXCH abc"), MoveKind::Exchange { count: 3 });
    assert_eq!(MoveKind::classify("", "xyz"), MoveKind::RackLeave);
    assert_eq!(MoveKind::classify("H8", "PASS"), MoveKind::Placement);
}

#[test]
fn exchange_text_is_inflected() {
    assert_eq!(MoveKind::Exchange { count: 1 }.text("EXCH a"), "Exchanged 1 tile");
    assert_eq!(MoveKind::Exchange { count: 4 }.text("EXCH abcd"), "Exchanged 4 tiles");
}

#[test]
fn placement_text_drops_blank_markers() {
    assert_eq!(MoveKind::Placement.text("?a?bc"), "abc");
}

// =============================================================
// Totals and sides
// =============================================================

#[test]
fn totals_are_clamped_at_zero() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "H8", "abc", 5), false);
    list.append(&mv(0, "", "TIME", -20), false);
    assert_eq!(list.totals(), [0, 0]);
    assert_eq!(list.records()[1].total, 0);
}

#[test]
fn totals_are_tracked_per_side() {
    let mut list = MoveList::new(None, false);
    list.append(&mv(0, "H8", "word", 16), false);
    list.append(&mv(1, "8H", "wow", 9), false);
    list.append(&mv(0, "", "PASS", 0), false);
    assert_eq!(list.totals(), [16, 9]);
    assert_eq!(list.num_moves(), 3);
    assert_eq!(list.num_tile_moves(), 2);
}

#[test]
fn spectators_see_left_side_as_local() {
    let mut list = MoveList::new(None, false);
    list.append(&mv(0, "", "PASS", 0), false);
    list.append(&mv(1, "", "PASS", 0), false);
    assert!(list.records()[0].local_side);
    assert!(!list.records()[1].local_side);
}

#[test]
fn local_player_side_follows_seat() {
    let mut list = MoveList::new(Some(1), false);
    list.append(&mv(0, "", "PASS", 0), false);
    list.append(&mv(1, "", "PASS", 0), false);
    assert!(!list.records()[0].local_side);
    assert!(list.records()[1].local_side);
    assert_eq!(list.records()[0].highlight_color(), 1);
}

// =============================================================
// Game over
// =============================================================

#[test]
fn live_win_plays_cue() {
    let mut list = MoveList::new(Some(0), false);
    assert_eq!(list.append(&mv(0, "H8", "abc", 30), false), None);
    list.append(&mv(1, "8H", "de", 10), false);
    let outcome = list.append(&mv(0, "", "OVER", 0), false).unwrap();
    assert_eq!(outcome, GameOverOutcome { winner: Some(0), local_won: true, play_cue: true });
    assert!(list.is_game_over());
}

#[test]
fn replayed_win_is_silent_unless_zombie() {
    let history = [mv(1, "H8", "abc", 30), mv(0, "", "OVER", 0)];
    let mut quiet = MoveList::new(Some(1), false);
    let mut zombie = MoveList::new(Some(1), true);
    for entry in &history[..1] {
        quiet.append(entry, true);
        zombie.append(entry, true);
    }
    let quiet_outcome = quiet.append(&history[1], true).unwrap();
    let zombie_outcome = zombie.append(&history[1], true).unwrap();
    assert!(quiet_outcome.local_won && !quiet_outcome.play_cue);
    assert!(zombie_outcome.play_cue);
}

#[test]
fn tie_has_no_winner() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "H8", "ab", 8), false);
    list.append(&mv(1, "8H", "cd", 8), false);
    let outcome = list.append(&mv(1, "", "OVER", 0), false).unwrap();
    assert_eq!(outcome.winner, None);
    assert!(!outcome.local_won && !outcome.play_cue);
}

#[test]
fn spectator_never_wins() {
    let mut list = MoveList::new(None, false);
    list.append(&mv(0, "H8", "ab", 8), false);
    let outcome = list.append(&mv(0, "", "OVER", 0), false).unwrap();
    assert_eq!(outcome.winner, Some(0));
    assert!(!outcome.local_won);
}

// =============================================================
// Highlighting and markup
// =============================================================

#[test]
fn highlight_walks_horizontal_word() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "H8", "a?bc", 7), false);
    let cells: Vec<String> = list.records()[0].highlight_cells().iter().map(ToString::to_string).collect();
    assert_eq!(cells, ["H8", "H9", "H10"]);
}

#[test]
fn highlight_walks_vertical_word() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "8H", "ab", 7), false);
    let cells: Vec<String> = list.records()[0].highlight_cells().iter().map(ToString::to_string).collect();
    assert_eq!(cells, ["H8", "I8"]);
}

#[test]
fn non_placements_have_no_highlight_or_lookup() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "", "PASS", 0), false);
    list.append(&mv(1, "H8", "?xy", 3), false);
    assert!(list.records()[0].highlight_cells().is_empty());
    assert_eq!(list.records()[0].lookup_word(), None);
    assert_eq!(list.records()[1].lookup_word(), Some("xy"));
}

#[test]
fn left_markup_puts_total_first() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "H8", "ab", 12), false);
    assert_eq!(
        list.records()[0].to_html(),
        r#"<div title="Click to look up" class="move leftmove humangrad_left"><span class="total">12</span><span class="score">12</span><span class="wordmove"><i>ab</i> (H8)</span></div>"#
    );
}

#[test]
fn right_markup_puts_total_last() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(1, "", "PASS", 0), false);
    assert_eq!(
        list.records()[0].to_html(),
        r#"<div class="move rightmove autoplayergrad_right"><span class="othermove"> <i>Pass</i></span><span class="score">0</span><span class="total">0</span></div>"#
    );
}

#[test]
fn markup_escapes_text() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "", "<b>", 0), false);
    assert!(list.records()[0].to_html().contains("<i>&lt;b&gt;</i>"));
}

#[test]
fn game_over_markup_has_review_button() {
    let mut list = MoveList::new(Some(0), false);
    list.append(&mv(0, "", "OVER", 0), false);
    assert!(list.records()[0].to_html().starts_with(r#"<div class="move gameover"><span class="gameovermsg">Game over</span>"#));
}
