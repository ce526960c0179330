//! Server queries.
//!
//! Client-side (hydrate): JSON POSTs via `gloo-net`.
//! Native builds: every query fails with `ClientError::Unavailable`, which
//! keeps the session logic testable without a browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged here once and returned as `ClientError`; callers
//! decide whether the view needs to react.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::types::GameUpdate;
use crate::error::ClientError;

pub const SUBMIT_MOVE_URL: &str = "/submitmove";
pub const GAME_STATE_URL: &str = "/gamestate";

/// Body of a move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitMove<'a> {
    /// Move strings such as `"H8=a"`, or a single keyword move.
    pub moves: &'a [String],
    /// Moves the client has seen, so the server can detect a stale view.
    pub mcount: usize,
    pub uuid: &'a str,
}

/// Reply to a move submission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MoveReply {
    /// Zero on success, otherwise a server error code.
    pub result: i32,
    #[serde(flatten)]
    pub update: GameUpdate,
}

impl MoveReply {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result == 0
    }
}

#[derive(Debug, Deserialize)]
struct GameStateReply {
    ok: bool,
    #[serde(default)]
    game: Option<GameUpdate>,
}

#[cfg(any(test, feature = "hydrate"))]
fn failed_status(url: &str, status: u16) -> ClientError {
    ClientError::Http { url: url.to_owned(), status }
}

/// POST `body` as JSON to `url` and decode the JSON reply.
///
/// # Errors
///
/// Returns `ClientError::Network` if the request cannot be sent,
/// `ClientError::Http` for a non-success status and `ClientError::Decode`
/// for an unreadable reply.
pub async fn server_query<B, T>(url: &str, body: &B) -> Result<T, ClientError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let result = send_query(url, body).await;
    if let Err(e) = &result {
        log::error!("server query {url} failed: {e}");
    }
    result
}

async fn send_query<B, T>(url: &str, body: &B) -> Result<T, ClientError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    #[cfg(feature = "hydrate")]
    {
        let network = |e: gloo_net::Error| ClientError::Network { url: url.to_owned(), message: e.to_string() };
        let resp = gloo_net::http::Request::post(url).json(body).map_err(network)?.send().await.map_err(network)?;
        if !resp.ok() {
            return Err(failed_status(url, resp.status()));
        }
        let raw = resp.text().await.map_err(network)?;
        Ok(serde_json::from_str(&raw)?)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(ClientError::Unavailable)
    }
}

/// Submit the tiles placed this turn.
///
/// # Errors
///
/// See [`server_query`].
pub async fn submit_move(game_id: &str, moves: &[String], mcount: usize) -> Result<MoveReply, ClientError> {
    server_query(SUBMIT_MOVE_URL, &SubmitMove { moves, mcount, uuid: game_id }).await
}

/// Fetch the full state of a game; `None` when the server refuses.
///
/// # Errors
///
/// See [`server_query`].
pub async fn fetch_game_state(game_id: &str) -> Result<Option<GameUpdate>, ClientError> {
    let reply: GameStateReply = server_query(GAME_STATE_URL, &serde_json::json!({ "game": game_id })).await?;
    Ok(reply.ok.then_some(reply.game).flatten())
}
