//! Score display for both players.
//!
//! The server reports raw scores. While a player is in overtime their
//! displayed score carries the running penalty, never dropping below zero.

#[cfg(test)]
#[path = "score_test.rs"]
mod score_test;

/// Raw scores and overtime penalties of both players.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    scores: [i32; 2],
    penalties: [i32; 2],
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scores(&mut self, scores: [i32; 2]) {
        self.scores = scores;
    }

    /// Replace the penalties. Returns whether the displayed scores changed.
    pub fn set_penalties(&mut self, penalties: [i32; 2]) -> bool {
        let before = self.displayed();
        self.penalties = penalties;
        before != self.displayed()
    }

    /// Whether any penalty currently applies.
    #[must_use]
    pub fn has_penalty(&self) -> bool {
        self.penalties.iter().any(|p| *p != 0)
    }

    #[must_use]
    pub fn display(&self, player: u8) -> i32 {
        let i = usize::from(player.min(1));
        clamp_total(self.scores[i], self.penalties[i])
    }

    #[must_use]
    pub fn displayed(&self) -> [i32; 2] {
        [self.display(0), self.display(1)]
    }
}

/// `total + delta`, floored at zero.
#[must_use]
pub fn clamp_total(total: i32, delta: i32) -> i32 {
    total.saturating_add(delta).max(0)
}
