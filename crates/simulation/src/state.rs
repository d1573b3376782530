//! The single owner of the city: grid, statistics and the tick counter.

use bevy::prelude::*;

use crate::config::{CONSTRUCTION_RATE, CONSTRUCTION_STEP, MAX_HEIGHT};
use crate::constraint::ForbiddenNumber;
use crate::grid::CityGrid;
use crate::sim_params::SimParams;
use crate::stats::CityStats;

/// Rules the placement engine enforces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineRules {
    pub oracle: ForbiddenNumber,
    pub max_height: u8,
    /// Height a build or new story starts at, above the previous level.
    pub step: f32,
    /// Construction speed in stories per second.
    pub rate: f32,
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            oracle: ForbiddenNumber::default(),
            max_height: MAX_HEIGHT,
            step: CONSTRUCTION_STEP,
            rate: CONSTRUCTION_RATE,
        }
    }
}

impl From<&SimParams> for EngineRules {
    fn from(params: &SimParams) -> Self {
        Self {
            oracle: params.oracle(),
            max_height: params.max_height,
            step: params.construction_step,
            rate: params.construction_rate,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationState {
    pub grid: CityGrid,
    pub stats: CityStats,
    /// False once something changed since the last recompute.
    pub stats_fresh: bool,
    pub tick: u64,
    pub rules: EngineRules,
}

impl SimulationState {
    pub fn new(grid: CityGrid, rules: EngineRules) -> Self {
        let stats = CityStats::recompute(&grid);
        Self {
            grid,
            stats,
            stats_fresh: true,
            tick: 0,
            rules,
        }
    }

    pub fn side(&self) -> usize {
        self.grid.side
    }

    /// Start of a tick: bump the counter and bring statistics up to date.
    pub fn begin_tick(&mut self) {
        self.tick += 1;
        self.recompute_stats();
    }

    pub fn recompute_stats(&mut self) {
        self.stats = CityStats::recompute(&self.grid);
        self.stats_fresh = true;
    }

    /// Raises every rising tile by `dt * rate`, stopping at the story it is
    /// working towards.
    pub fn advance_construction(&mut self, dt: f32) {
        let rise = dt * self.rules.rate;
        for tile in &mut self.grid.tiles {
            if tile.building.is_some() && tile.under_construction() {
                tile.height = (tile.height + rise).min(tile.height.ceil());
            }
        }
    }

    pub fn building_count(&self) -> u32 {
        self.stats.total.buildings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::Footprint;
    use crate::grid::{BuildingType, Tile};

    fn rising(height: f32) -> Tile {
        Tile {
            height,
            building: Some(BuildingType::Residential),
            footprint: Footprint::Single,
        }
    }

    #[test]
    fn test_one_step_advances_by_dt_times_rate() {
        let mut grid = CityGrid::new(2);
        grid.set(0, rising(0.05));
        let mut state = SimulationState::new(grid, EngineRules::default());
        let dt = 1.0 / 120.0;
        state.advance_construction(dt);
        let expected = 0.05 + dt * CONSTRUCTION_RATE;
        assert!((state.grid.tiles[0].height - expected).abs() < 1e-6);
    }

    #[test]
    fn test_construction_stops_at_next_story() {
        let mut grid = CityGrid::new(2);
        grid.set(0, rising(1.95));
        let mut state = SimulationState::new(grid, EngineRules::default());
        state.advance_construction(1.0);
        assert_eq!(state.grid.tiles[0].height, 2.0);
        state.advance_construction(1.0);
        assert_eq!(state.grid.tiles[0].height, 2.0);
    }

    #[test]
    fn test_begin_tick_refreshes_stats() {
        let mut state = SimulationState::new(CityGrid::new(2), EngineRules::default());
        state.grid.set(3, rising(1.0));
        state.stats_fresh = false;
        state.begin_tick();
        assert_eq!(state.tick, 1);
        assert!(state.stats_fresh);
        assert_eq!(state.building_count(), 1);
    }
}
