use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::footprint::Footprint;
use crate::grid::BuildingType;

/// The fixed tool bar, in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Bulldoze,
    AddStory,
    House,
    Longhouse,
    Apartments,
    CornerStore,
    Mart,
    Mall,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Bulldoze,
        ToolKind::AddStory,
        ToolKind::House,
        ToolKind::Longhouse,
        ToolKind::Apartments,
        ToolKind::CornerStore,
        ToolKind::Mart,
        ToolKind::Mall,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            ToolKind::Bulldoze => 0,
            ToolKind::AddStory => 1,
            ToolKind::House => 2,
            ToolKind::Longhouse => 3,
            ToolKind::Apartments => 4,
            ToolKind::CornerStore => 5,
            ToolKind::Mart => 6,
            ToolKind::Mall => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Bulldoze => "Bulldoze",
            ToolKind::AddStory => "Add story",
            ToolKind::House => "House",
            ToolKind::Longhouse => "Longhouse",
            ToolKind::Apartments => "Apartments",
            ToolKind::CornerStore => "Corner store",
            ToolKind::Mart => "Mart",
            ToolKind::Mall => "Mall",
        }
    }

    pub fn building(self) -> Option<BuildingType> {
        match self {
            ToolKind::House | ToolKind::Longhouse | ToolKind::Apartments => {
                Some(BuildingType::Residential)
            }
            ToolKind::CornerStore | ToolKind::Mart | ToolKind::Mall => {
                Some(BuildingType::Commercial)
            }
            ToolKind::Bulldoze | ToolKind::AddStory => None,
        }
    }

    /// Plots covered by what this tool builds; zero for non-building tools.
    pub fn tile_count(self) -> u32 {
        match self {
            ToolKind::House | ToolKind::CornerStore => 1,
            ToolKind::Longhouse | ToolKind::Mart => 2,
            ToolKind::Apartments | ToolKind::Mall => 4,
            ToolKind::Bulldoze | ToolKind::AddStory => 0,
        }
    }

    /// Footprint this tool builds, given how many tool selections have
    /// happened so far. Doubles turn on every selection.
    pub fn footprint(self, selections: u32) -> Option<Footprint> {
        match self.tile_count() {
            1 => Some(Footprint::Single),
            2 if selections % 2 == 0 => Some(Footprint::Deep),
            2 => Some(Footprint::Wide),
            4 => Some(Footprint::Quad),
            _ => None,
        }
    }

    /// The engine action this tool performs on `index`.
    pub fn action_at(self, index: usize, selections: u32) -> Action {
        match (self.building(), self.footprint(selections)) {
            (Some(building), Some(footprint)) => Action::Build {
                index,
                building,
                footprint,
            },
            _ if self == ToolKind::AddStory => Action::AddStory { index },
            _ => Action::Demolish { index },
        }
    }
}

/// Currently selected tool and how many selections have been made.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolState {
    pub selected: Option<ToolKind>,
    pub selections: u32,
}

impl ToolState {
    /// Selects by index. An index outside `allowed` clears the selection.
    /// Returns the tool now selected.
    pub fn select(&mut self, index: u8, allowed: &[ToolKind]) -> Option<ToolKind> {
        self.selections = self.selections.wrapping_add(1);
        self.selected = ToolKind::from_index(index).filter(|tool| allowed.contains(tool));
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn footprint(&self) -> Option<Footprint> {
        self.selected.and_then(|tool| tool.footprint(self.selections))
    }

    pub fn action_at(&self, index: usize) -> Option<Action> {
        self.selected.map(|tool| tool.action_at(index, self.selections))
    }
}
