pub mod result_log;
pub mod results;

pub use result_log::{ActionLog, LoggedAction};
pub use results::*;

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::grid::BuildingType;

/// A mutation request against one plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Build {
        index: usize,
        building: BuildingType,
        footprint: Footprint,
    },
    AddStory {
        index: usize,
    },
    Demolish {
        index: usize,
    },
}

impl Action {
    pub fn index(&self) -> usize {
        match *self {
            Action::Build { index, .. } | Action::AddStory { index } | Action::Demolish { index } => {
                index
            }
        }
    }
}

/// Who asked for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOrigin {
    Player,
    Autoplay,
}

#[cfg(test)]
mod tests;
