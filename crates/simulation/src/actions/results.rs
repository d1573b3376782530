use serde::{Deserialize, Serialize};

use crate::audio_cues::SfxCue;
use crate::constraint::Aggregate;
use crate::footprint::Footprint;
use crate::grid::BuildingType;

/// Why an action was refused. A refused action never changes any state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionError {
    OutOfBounds,
    /// The target is void or claimed by a neighbouring building.
    NoPlot,
    Occupied,
    NoBuilding,
    UnderConstruction,
    MaxHeight,
    FootprintOffGrid,
    FootprintBlocked,
    Forbidden(Aggregate),
    /// Something already changed this tick; wait for the next recompute.
    StaleStatistics,
    NoToolSelected,
    NoTarget,
    ToolUnavailable,
    AutoplayActive,
}

/// What an applied action did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppliedAction {
    Built {
        index: usize,
        building: BuildingType,
        footprint: Footprint,
    },
    StoryAdded {
        index: usize,
        stories: u32,
    },
    Demolished {
        index: usize,
        building: BuildingType,
    },
}

impl AppliedAction {
    pub fn index(&self) -> usize {
        match *self {
            AppliedAction::Built { index, .. }
            | AppliedAction::StoryAdded { index, .. }
            | AppliedAction::Demolished { index, .. } => index,
        }
    }

    pub fn cue(&self) -> SfxCue {
        match *self {
            AppliedAction::Built { building, .. } => SfxCue::Build(building),
            AppliedAction::StoryAdded { .. } => SfxCue::Story,
            AppliedAction::Demolished { .. } => SfxCue::Demolish,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionResult {
    Applied(AppliedAction),
    Refused(ActionError),
}

impl ActionResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionResult::Applied(_))
    }

    pub fn error(&self) -> Option<ActionError> {
        match self {
            ActionResult::Refused(e) => Some(*e),
            ActionResult::Applied(_) => None,
        }
    }
}

impl From<Result<AppliedAction, ActionError>> for ActionResult {
    fn from(result: Result<AppliedAction, ActionError>) -> Self {
        match result {
            Ok(applied) => ActionResult::Applied(applied),
            Err(e) => ActionResult::Refused(e),
        }
    }
}

impl From<ActionError> for ActionResult {
    fn from(e: ActionError) -> Self {
        ActionResult::Refused(e)
    }
}
