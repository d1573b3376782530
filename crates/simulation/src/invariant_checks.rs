//! Runtime guards over the grid.
//!
//! Runs after every frame that produced ticks. Violations are logged and
//! counted; the grid is left untouched so the problem stays visible.

use bevy::prelude::*;

use crate::footprint::Footprint;
use crate::grid::CityGrid;
use crate::state::SimulationState;

/// Violations found by the last validation pass. Used by integration tests.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolations {
    pub height_out_of_range: u32,
    pub building_on_non_plot: u32,
    pub unclaimed_footprint: u32,
    /// Last tick that was validated.
    pub checked_tick: u64,
}

impl InvariantViolations {
    pub fn total(&self) -> u32 {
        self.height_out_of_range + self.building_on_non_plot + self.unclaimed_footprint
    }
}

pub fn scan_grid(grid: &CityGrid, max_height: u8) -> InvariantViolations {
    let mut found = InvariantViolations::default();
    let max = f32::from(max_height);
    for (i, tile) in grid.tiles.iter().enumerate() {
        if !(0.0..=max).contains(&tile.height) {
            found.height_out_of_range += 1;
        }
        if !tile.footprint.is_anchor() && tile.building.is_some() {
            found.building_on_non_plot += 1;
        }
        if tile.building.is_none() {
            continue;
        }
        let claimed = tile.footprint.claimed_cells(i, grid.side);
        let intact = claimed.is_some_and(|(cells, n)| {
            cells[..n]
                .iter()
                .all(|&c| grid.tiles[c].footprint == Footprint::Claimed && grid.tiles[c].building.is_none())
        });
        if tile.footprint.is_anchor() && !intact {
            found.unclaimed_footprint += 1;
        }
    }
    found
}

pub fn validate_grid(state: Res<SimulationState>, mut violations: ResMut<InvariantViolations>) {
    if state.tick == violations.checked_tick {
        return;
    }
    let mut found = scan_grid(&state.grid, state.rules.max_height);
    found.checked_tick = state.tick;
    if found.total() > 0 {
        warn!(
            "Invariant violation at tick {}: {} heights out of range, {} buildings off-plot, {} broken footprints",
            state.tick,
            found.height_out_of_range,
            found.building_on_non_plot,
            found.unclaimed_footprint
        );
    }
    *violations = found;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{BuildingType, Tile};

    #[test]
    fn test_clean_grid_has_no_violations() {
        let (grid, _) = CityGrid::from_layout(3, Some("141500000000000000"), 4);
        assert_eq!(scan_grid(&grid, 4).total(), 0);
    }

    #[test]
    fn test_detects_each_violation() {
        let mut grid = CityGrid::new(3);
        grid.set(
            0,
            Tile {
                height: 9.0,
                building: Some(BuildingType::Residential),
                footprint: Footprint::Single,
            },
        );
        grid.set(
            4,
            Tile {
                height: 1.0,
                building: Some(BuildingType::Commercial),
                footprint: Footprint::Quad,
            },
        );
        grid.set(
            2,
            Tile {
                height: 1.0,
                building: Some(BuildingType::Commercial),
                footprint: Footprint::Claimed,
            },
        );
        let found = scan_grid(&grid, 4);
        assert_eq!(found.height_out_of_range, 1);
        assert_eq!(found.building_on_non_plot, 1);
        assert_eq!(found.unclaimed_footprint, 1);
    }
}
