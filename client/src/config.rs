//! Per-page game configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page embeds one JSON blob describing the game being viewed. It is
//! parsed once at startup and handed to `GameSession` and the browser glue.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use board::blank::Alphabet;
use board::engine::EngineConfig;
use serde::Deserialize;

use crate::error::ClientError;

/// Settings for one game view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    pub game_id: String,
    pub user_id: String,
    /// Seat of the viewing user, `None` when spectating.
    #[serde(default)]
    pub local_player: Option<u8>,
    /// Whether the game runs with clocks.
    #[serde(default)]
    pub timed: bool,
    /// The game was decided while this user was away.
    #[serde(default)]
    pub zombie: bool,
    /// Verbose logging.
    #[serde(default)]
    pub debug: bool,
    /// Letters a blank may stand for.
    #[serde(default = "default_alphabet")]
    pub alphabet: String,
}

fn default_alphabet() -> String {
    board::consts::DEFAULT_ALPHABET.to_owned()
}

impl GameConfig {
    /// Parse and validate the page blob.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Decode` for malformed JSON and
    /// `ClientError::Config` for a seat other than 0 or 1 or an empty game id.
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.game_id.is_empty() {
            return Err(ClientError::Config("game_id is empty".into()));
        }
        if let Some(seat) = config.local_player {
            if seat > 1 {
                return Err(ClientError::Config(format!("local_player {seat} is not a seat")));
            }
        }
        Ok(config)
    }

    /// Engine settings for this game, with the host-provided shuffle seed.
    #[must_use]
    pub fn engine_config(&self, seed: u64) -> EngineConfig {
        EngineConfig { alphabet: Alphabet::new(&self.alphabet), seed }
    }

    #[must_use]
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug { log::LevelFilter::Debug } else { log::LevelFilter::Info }
    }

    /// Path of the per-game channel for this user.
    #[must_use]
    pub fn game_channel(&self) -> String {
        format!("game/{}/{}", self.game_id, self.user_id)
    }
}
