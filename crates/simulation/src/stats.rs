//! Aggregate city statistics, recomputed from the grid every tick.

use serde::{Deserialize, Serialize};

use crate::grid::{BuildingType, CityGrid};

/// Histogram bucket for a building's footprint size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Single,
    Double,
    Quad,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Single, SizeClass::Double, SizeClass::Quad];

    pub fn from_tile_count(tiles: u32) -> Option<Self> {
        match tiles {
            1 => Some(SizeClass::Single),
            2 => Some(SizeClass::Double),
            4 => Some(SizeClass::Quad),
            _ => None,
        }
    }

    pub fn slot(self) -> usize {
        match self {
            SizeClass::Single => 0,
            SizeClass::Double => 1,
            SizeClass::Quad => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Single => "1x1",
            SizeClass::Double => "2x1",
            SizeClass::Quad => "2x2",
        }
    }
}

/// Counts for one scope (the whole city, or a single building type).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Buildings, counted in plots covered.
    pub buildings: u32,
    /// Stories, counted per plot covered.
    pub stories: u32,
    /// Number of buildings per footprint size.
    pub sizes: [u32; 3],
}

impl Tally {
    pub fn size(&self, class: SizeClass) -> u32 {
        self.sizes[class.slot()]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStats {
    pub total: Tally,
    pub by_type: [Tally; 2],
}

impl CityStats {
    pub fn recompute(grid: &CityGrid) -> Self {
        let mut stats = Self::default();
        for tile in &grid.tiles {
            let Some(building) = tile.building else {
                continue;
            };
            let tiles = tile.footprint.tile_count();
            let Some(class) = SizeClass::from_tile_count(tiles) else {
                continue;
            };
            let stories = tile.stories() * tiles;
            for tally in [&mut stats.total, &mut stats.by_type[building.slot()]] {
                tally.buildings += tiles;
                tally.stories += stories;
                tally.sizes[class.slot()] += 1;
            }
        }
        stats
    }

    pub fn of_type(&self, building: BuildingType) -> &Tally {
        &self.by_type[building.slot()]
    }
}
