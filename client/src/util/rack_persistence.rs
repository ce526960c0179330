//! Local cache of the player's tile arrangement.
//!
//! SYSTEM CONTEXT
//! ==============
//! The arrangement of movable tiles survives a page reload through
//! `localStorage`, one entry per game. The engine validates a restored
//! layout against the live tiles, so a stale entry is harmless.
//!
//! Outside the browser these helpers are no-ops.

#[cfg(test)]
#[path = "rack_persistence_test.rs"]
mod rack_persistence_test;

use board::store::RackLayout;

/// Storage key for one game's cached layout.
#[must_use]
pub fn tiles_key(game_id: &str) -> String {
    format!("tiles.{game_id}")
}

/// Cache `layout` for `game_id`.
pub fn save_tiles(game_id: &str, layout: &RackLayout) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        match serde_json::to_string(layout) {
            Ok(raw) => {
                if let Err(e) = storage.set_item(&tiles_key(game_id), &raw) {
                    log::warn!("could not cache tiles for {game_id}: {e:?}");
                }
            }
            Err(e) => log::warn!("could not encode tiles for {game_id}: {e}"),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (game_id, layout);
    }
}

/// Read back the cached layout for `game_id`, if any.
#[must_use]
pub fn load_tiles(game_id: &str) -> Option<RackLayout> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(&tiles_key(game_id)).ok().flatten()?;
        decode_layout(&raw)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = game_id;
        None
    }
}

/// Forget the cached layout for `game_id`.
pub fn clear_tiles(game_id: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = local_storage() {
            if let Err(e) = storage.remove_item(&tiles_key(game_id)) {
                log::warn!("could not clear cached tiles for {game_id}: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = game_id;
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn decode_layout(raw: &str) -> Option<RackLayout> {
    match serde_json::from_str(raw) {
        Ok(layout) => Some(layout),
        Err(e) => {
            log::warn!("discarding unreadable tile cache: {e}");
            None
        }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}
