//! Input model: raw events from the host and the interaction state machine.
//!
//! The host translates DOM drag, click and key events into [`InputEvent`]s
//! and feeds them to [`crate::engine::EngineCore::handle`]. `InputState` is
//! the interaction currently in progress; each variant carries the context it
//! needs, so a tile can never be both selected and dragged.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::slot::{Orientation, Slot};
use crate::store::TileId;
use crate::typing::TypingLine;

/// A keyboard key the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Backspace,
    /// A printable character, as typed (shifted letters arrive uppercase).
    Char(char),
}

impl Key {
    /// Parse a browser key name (`"ArrowUp"`, `"Escape"`, `"q"`) or a key
    /// binding name (`"up"`, `"esc"`, `"shift+q"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "ArrowUp" | "up" => Self::Up,
            "ArrowDown" | "down" => Self::Down,
            "ArrowLeft" | "left" => Self::Left,
            "ArrowRight" | "right" => Self::Right,
            "Escape" | "esc" => Self::Escape,
            "Backspace" | "backspace" => Self::Backspace,
            other => {
                let (shifted, rest) = match other.strip_prefix("shift+") {
                    Some(rest) => (true, rest),
                    None => (false, other),
                };
                let mut chars = rest.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                let c = if shifted { c.to_uppercase().next().unwrap_or(c) } else { c };
                Self::Char(c)
            }
        };
        Some(key)
    }

    fn name(self) -> String {
        match self {
            Self::Up => "ArrowUp".to_owned(),
            Self::Down => "ArrowDown".to_owned(),
            Self::Left => "ArrowLeft".to_owned(),
            Self::Right => "ArrowRight".to_owned(),
            Self::Escape => "Escape".to_owned(),
            Self::Backspace => "Backspace".to_owned(),
            Self::Char(c) => c.to_string(),
        }
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.name()
    }
}

impl TryFrom<String> for Key {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unknown key: {value:?}"))
    }
}

/// Where a dragged tile was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// A specific slot on the board or rack.
    Slot(Slot),
    /// The area around the board; redirected to the first empty rack slot.
    Background,
}

/// An input event from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// A drag started on a tile.
    PointerDown { tile: TileId },
    /// A dragged tile was released over a target.
    PointerDrop { target: DropTarget },
    /// A drag ended without a drop.
    PointerUp,
    /// A tile was clicked (click-to-select).
    TileClick { tile: TileId },
    /// An empty slot was clicked.
    CellClick { slot: Slot },
    KeyPress { key: Key },
}

/// Key bindings the host should have active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMap {
    /// Escape resets the rack, Backspace rescrambles it.
    Default,
    /// Arrow keys drive the typing line, Escape leaves typing mode.
    Typing,
    /// Legal letters, shifted letters and Escape answer the blank dialog.
    BlankDialog,
}

/// Coarse interaction mode, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Idle,
    Dragging,
    SingleSelected,
    TypingHorizontal,
    TypingVertical,
}

/// Interaction in progress.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// Nothing selected, no drag, no typing line.
    #[default]
    Idle,
    /// A tile is being dragged.
    Dragging {
        /// The dragged tile; it stays in its origin slot until dropped.
        tile: TileId,
    },
    /// A tile was clicked and waits for a target click.
    SingleSelected {
        /// The selected tile.
        tile: TileId,
    },
    /// Keyboard placement along a line of board cells.
    Typing(TypingLine),
}

impl InputState {
    #[must_use]
    pub fn mode(&self) -> InputMode {
        match self {
            Self::Idle => InputMode::Idle,
            Self::Dragging { .. } => InputMode::Dragging,
            Self::SingleSelected { .. } => InputMode::SingleSelected,
            Self::Typing(line) => match line.orientation() {
                Orientation::Horizontal => InputMode::TypingHorizontal,
                Orientation::Vertical => InputMode::TypingVertical,
            },
        }
    }

    /// The selected tile, if in click-to-place mode.
    #[must_use]
    pub fn selected(&self) -> Option<TileId> {
        match self {
            Self::SingleSelected { tile } => Some(*tile),
            _ => None,
        }
    }

    /// The dragged tile, if a drag is in progress.
    #[must_use]
    pub fn dragged(&self) -> Option<TileId> {
        match self {
            Self::Dragging { tile } => Some(*tile),
            _ => None,
        }
    }

    #[must_use]
    pub fn typing(&self) -> Option<&TypingLine> {
        match self {
            Self::Typing(line) => Some(line),
            _ => None,
        }
    }

    pub fn typing_mut(&mut self) -> Option<&mut TypingLine> {
        match self {
            Self::Typing(line) => Some(line),
            _ => None,
        }
    }

    /// Key bindings that belong to this state.
    #[must_use]
    pub fn key_map(&self) -> KeyMap {
        match self {
            Self::Typing(_) => KeyMap::Typing,
            _ => KeyMap::Default,
        }
    }
}
