//! Sound cue events emitted by the simulation.
//!
//! The simulation only names the cue; whoever owns the audio device decides
//! what to play for it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::BuildingType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SfxCue {
    /// A new building started. Each type has its own sound.
    Build(BuildingType),
    Story,
    Demolish,
    Select,
    Hover,
    Error,
}

impl SfxCue {
    pub fn id(self) -> &'static str {
        match self {
            SfxCue::Build(BuildingType::Residential) => "build_residential",
            SfxCue::Build(BuildingType::Commercial) => "build_commercial",
            SfxCue::Story => "story",
            SfxCue::Demolish => "demolish",
            SfxCue::Select => "select",
            SfxCue::Hover => "hover",
            SfxCue::Error => "error",
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayCueEvent {
    pub cue: SfxCue,
    /// Multiplier on the output volume (0.0-1.0).
    pub volume_scale: f32,
}

impl PlayCueEvent {
    pub fn new(cue: SfxCue) -> Self {
        Self {
            cue,
            volume_scale: 1.0,
        }
    }

    pub fn with_volume(cue: SfxCue, volume_scale: f32) -> Self {
        Self {
            cue,
            volume_scale: volume_scale.clamp(0.0, 1.0),
        }
    }
}
