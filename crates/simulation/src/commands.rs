use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Input intents from the player, already translated from raw devices.
#[derive(Event, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    SelectTool(u8),
    /// `held` marks a repeat from a key held down since an earlier frame.
    /// A refused repeat is dropped without a cue or a log entry.
    Confirm { held: bool },
    Deny,
    /// Lock the selection to the hovered tile on the next frame.
    PointerPressed,
    Hover(Option<usize>),
    ToggleAutoplay,
    SetFast(bool),
    TogglePause,
    LoadMap { category: String, index: usize },
}
