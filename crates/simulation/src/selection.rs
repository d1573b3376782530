//! Which tile the player is pointing at, which one is locked in, and how
//! the renderer should highlight it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::state::SimulationState;
use crate::tools::{ToolKind, ToolState};

#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub hovered: Option<usize>,
    pub selected: Option<usize>,
    /// A pointer press waiting to lock `selected` on the next frame.
    pub lock_pending: bool,
}

impl Selection {
    pub fn clear(&mut self) {
        self.hovered = None;
        self.selected = None;
        self.lock_pending = false;
    }

    /// Locks onto the hovered tile if a press is pending. Returns the newly
    /// locked tile.
    pub fn resolve_lock(&mut self) -> Option<usize> {
        if !std::mem::take(&mut self.lock_pending) {
            return None;
        }
        self.selected = self.hovered;
        self.selected
    }

    /// The tile an action would apply to: the locked one, else the hovered one.
    pub fn action_target(&self) -> Option<usize> {
        self.selected.or(self.hovered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HighlightTone {
    #[default]
    NoTool,
    Refused,
    Allowed,
    AllowedDemolish,
}

impl HighlightTone {
    pub fn rgb(self) -> [f32; 3] {
        match self {
            HighlightTone::NoTool => [0.5, 0.5, 0.5],
            HighlightTone::Refused => [1.0, 0.0, 0.0],
            HighlightTone::Allowed => [0.0, 1.0, 0.0],
            HighlightTone::AllowedDemolish => [0.0, 1.0, 1.0],
        }
    }
}

/// What the renderer should mark this frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct Highlight {
    pub target: Option<usize>,
    /// Footprint code to outline at the target, `-1` for none.
    pub preview: i8,
    pub tone: HighlightTone,
}

impl Highlight {
    pub fn compute(
        state: &SimulationState,
        tools: &ToolState,
        selection: &Selection,
        autoplay: bool,
    ) -> Self {
        let target = selection
            .selected
            .or(if autoplay { None } else { selection.hovered });

        let tone = match (tools.selected, selection.action_target()) {
            (None, _) => HighlightTone::NoTool,
            (Some(_), None) => HighlightTone::Refused,
            (Some(tool), Some(index)) => {
                let allowed = tools
                    .action_at(index)
                    .is_some_and(|action| state.check(&action).is_ok());
                match (allowed, tool) {
                    (false, _) => HighlightTone::Refused,
                    (true, ToolKind::Bulldoze) => HighlightTone::AllowedDemolish,
                    (true, _) => HighlightTone::Allowed,
                }
            }
        };

        let preview = match (tools.footprint(), target) {
            (Some(footprint), _) if footprint.tile_count() > 1 => footprint.code(),
            (_, Some(index)) => state.grid.get(index).map_or(-1, |t| t.footprint.code()),
            _ => -1,
        };

        Self {
            target,
            preview,
            tone,
        }
    }
}
