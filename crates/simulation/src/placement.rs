//! Build, add-story and demolish: checked against the grid and the
//! forbidden-number oracle, then applied.
//!
//! Every check is a pure predicate. Nothing is mutated unless the whole
//! action is admitted.

use crate::actions::{Action, ActionError, AppliedAction};
use crate::constraint::StatDelta;
use crate::footprint::Footprint;
use crate::grid::{BuildingType, Tile};
use crate::state::SimulationState;
use crate::stats::SizeClass;

impl SimulationState {
    /// Validates `action` against current statistics. Ignores freshness, so
    /// it is safe for previews; use [`SimulationState::apply`] to commit.
    pub fn check(&self, action: &Action) -> Result<StatDelta, ActionError> {
        match *action {
            Action::Build {
                index,
                building,
                footprint,
            } => self.check_build(index, building, footprint),
            Action::AddStory { index } => self.check_add_story(index),
            Action::Demolish { index } => self.check_demolish(index),
        }
    }

    pub fn apply(&mut self, action: &Action) -> Result<AppliedAction, ActionError> {
        if !self.stats_fresh {
            return Err(ActionError::StaleStatistics);
        }
        self.check(action)?;
        let step = self.rules.step;
        let side = self.grid.side;

        let applied = match *action {
            Action::Build {
                index,
                building,
                footprint,
            } => {
                if let Some((cells, n)) = footprint.claimed_cells(index, side) {
                    for &c in &cells[..n] {
                        self.grid.tiles[c].footprint = Footprint::Claimed;
                    }
                }
                let tile = &mut self.grid.tiles[index];
                tile.building = Some(building);
                tile.footprint = footprint;
                tile.height += step;
                AppliedAction::Built {
                    index,
                    building,
                    footprint,
                }
            }
            Action::AddStory { index } => {
                let tile = &mut self.grid.tiles[index];
                tile.height += step;
                AppliedAction::StoryAdded {
                    index,
                    stories: tile.stories(),
                }
            }
            Action::Demolish { index } => {
                let tile = self.grid.tiles[index];
                let building = tile.building.ok_or(ActionError::NoBuilding)?;
                if let Some((cells, n)) = tile.footprint.claimed_cells(index, side) {
                    for &c in &cells[..n] {
                        self.grid.tiles[c] = Tile::default();
                    }
                }
                self.grid.tiles[index] = Tile::default();
                AppliedAction::Demolished { index, building }
            }
        };
        self.stats_fresh = false;
        Ok(applied)
    }

    fn anchor(&self, index: usize) -> Result<&Tile, ActionError> {
        let tile = self.grid.get(index).ok_or(ActionError::OutOfBounds)?;
        if !tile.is_plot() {
            return Err(ActionError::NoPlot);
        }
        Ok(tile)
    }

    fn check_build(
        &self,
        index: usize,
        building: BuildingType,
        footprint: Footprint,
    ) -> Result<StatDelta, ActionError> {
        let tile = self.anchor(index)?;
        if tile.building.is_some() || tile.height != 0.0 {
            return Err(ActionError::Occupied);
        }
        let tiles = footprint.tile_count();
        let class = SizeClass::from_tile_count(tiles).ok_or(ActionError::FootprintOffGrid)?;
        let (cells, n) = footprint
            .claimed_cells(index, self.grid.side)
            .ok_or(ActionError::FootprintOffGrid)?;
        if !cells[..n].iter().all(|&c| self.grid.tiles[c].is_vacant()) {
            return Err(ActionError::FootprintBlocked);
        }
        let delta = StatDelta::build(building, tiles, class);
        self.admit(delta)
    }

    fn check_add_story(&self, index: usize) -> Result<StatDelta, ActionError> {
        let tile = self.anchor(index)?;
        let building = tile.building.ok_or(ActionError::NoBuilding)?;
        if tile.height >= f32::from(self.rules.max_height) {
            return Err(ActionError::MaxHeight);
        }
        if tile.under_construction() {
            return Err(ActionError::UnderConstruction);
        }
        let (cells, n) = tile
            .footprint
            .claimed_cells(index, self.grid.side)
            .ok_or(ActionError::FootprintOffGrid)?;
        if !cells[..n]
            .iter()
            .all(|&c| self.grid.tiles[c].footprint == Footprint::Claimed)
        {
            return Err(ActionError::FootprintBlocked);
        }
        let delta = StatDelta::add_story(building, tile.footprint.tile_count());
        self.admit(delta)
    }

    fn check_demolish(&self, index: usize) -> Result<StatDelta, ActionError> {
        let tile = self.anchor(index)?;
        let building = tile.building.ok_or(ActionError::NoBuilding)?;
        let stories = tile.stories();
        if stories == 0 {
            return Err(ActionError::NoBuilding);
        }
        let tiles = tile.footprint.tile_count();
        let class = SizeClass::from_tile_count(tiles).ok_or(ActionError::NoBuilding)?;
        let delta = StatDelta::demolish(building, tiles, stories, class);
        self.admit(delta)
    }

    fn admit(&self, delta: StatDelta) -> Result<StatDelta, ActionError> {
        self.rules
            .oracle
            .admits(&self.stats, &delta)
            .map_err(ActionError::Forbidden)?;
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Aggregate;
    use crate::grid::CityGrid;
    use crate::state::EngineRules;

    fn state(side: usize) -> SimulationState {
        SimulationState::new(CityGrid::new(side), EngineRules::default())
    }

    fn build(index: usize, building: BuildingType, footprint: Footprint) -> Action {
        Action::Build {
            index,
            building,
            footprint,
        }
    }

    /// Applies and then refreshes, as a tick boundary would.
    fn commit(state: &mut SimulationState, action: Action) -> Result<AppliedAction, ActionError> {
        let result = state.apply(&action);
        state.recompute_stats();
        result
    }

    #[test]
    fn test_quad_claims_three_neighbours() {
        let mut s = state(3);
        commit(&mut s, build(0, BuildingType::Residential, Footprint::Quad)).unwrap();
        for c in [1, 3, 4] {
            assert_eq!(s.grid.tiles[c].footprint, Footprint::Claimed);
            assert_eq!(s.grid.tiles[c].building, None);
        }
        let with_building: Vec<usize> = (0..9)
            .filter(|&i| s.grid.tiles[i].building.is_some())
            .collect();
        assert_eq!(with_building, vec![0]);
        assert_eq!(s.stats.total.buildings, 4);
        assert_eq!(s.stats.total.size(SizeClass::Quad), 1);
    }

    #[test]
    fn test_demolish_releases_claims() {
        // Two quads, so removing one leaves every bucket above zero.
        let mut s = state(4);
        commit(&mut s, build(0, BuildingType::Residential, Footprint::Quad)).unwrap();
        commit(&mut s, build(2, BuildingType::Residential, Footprint::Quad)).unwrap();
        commit(&mut s, Action::Demolish { index: 0 }).unwrap();
        for c in [0, 1, 4, 5] {
            assert!(s.grid.tiles[c].is_vacant());
        }
        for c in [3, 6, 7] {
            assert_eq!(s.grid.tiles[c].footprint, Footprint::Claimed);
        }
        assert_eq!(s.stats.total.buildings, 4);
    }

    #[test]
    fn test_demolish_empty_tile_changes_nothing() {
        let mut s = state(3);
        let before = s.grid.clone();
        assert_eq!(
            s.apply(&Action::Demolish { index: 4 }),
            Err(ActionError::NoBuilding)
        );
        assert_eq!(s.grid, before);
        assert!(s.stats_fresh);
    }

    #[test]
    fn test_last_building_cannot_be_demolished() {
        let mut s = state(3);
        commit(&mut s, build(4, BuildingType::Residential, Footprint::Single)).unwrap();
        assert_eq!(
            commit(&mut s, Action::Demolish { index: 4 }),
            Err(ActionError::Forbidden(Aggregate::TotalBuildings))
        );
        assert!(s.grid.tiles[4].building.is_some());
    }

    #[test]
    fn test_stale_stats_refuse_second_action() {
        let mut s = state(3);
        s.apply(&build(0, BuildingType::Residential, Footprint::Single))
            .unwrap();
        assert_eq!(
            s.apply(&build(1, BuildingType::Residential, Footprint::Single)),
            Err(ActionError::StaleStatistics)
        );
        assert!(s.grid.tiles[1].is_vacant());
    }

    #[test]
    fn test_edge_rule_and_blocking() {
        let mut s = state(3);
        assert_eq!(
            s.check(&build(2, BuildingType::Residential, Footprint::Wide)),
            Err(ActionError::FootprintOffGrid)
        );
        commit(&mut s, build(1, BuildingType::Residential, Footprint::Single)).unwrap();
        assert_eq!(
            s.check(&build(0, BuildingType::Commercial, Footprint::Wide)),
            Err(ActionError::FootprintBlocked)
        );
        assert_eq!(
            s.check(&build(1, BuildingType::Commercial, Footprint::Single)),
            Err(ActionError::Occupied)
        );
    }

    #[test]
    fn test_claimed_and_void_tiles_are_not_targets() {
        let (grid, _) = CityGrid::from_layout(2, Some("F0000000"), 4);
        let mut s = SimulationState::new(grid, EngineRules::default());
        assert_eq!(
            s.check(&build(0, BuildingType::Residential, Footprint::Single)),
            Err(ActionError::NoPlot)
        );
        commit(&mut s, build(2, BuildingType::Residential, Footprint::Wide)).unwrap();
        assert_eq!(
            s.check(&Action::AddStory { index: 3 }),
            Err(ActionError::NoPlot)
        );
        assert_eq!(
            s.check(&Action::Demolish { index: 99 }),
            Err(ActionError::OutOfBounds)
        );
    }

    #[test]
    fn test_add_story_rules() {
        let mut s = state(3);
        commit(&mut s, build(0, BuildingType::Residential, Footprint::Single)).unwrap();
        assert_eq!(
            s.check(&Action::AddStory { index: 0 }),
            Err(ActionError::UnderConstruction)
        );
        s.advance_construction(1.0);
        assert_eq!(s.grid.tiles[0].height, 1.0);
        let applied = commit(&mut s, Action::AddStory { index: 0 }).unwrap();
        assert_eq!(applied, AppliedAction::StoryAdded { index: 0, stories: 2 });
        assert_eq!(s.stats.total.stories, 2);
        assert_eq!(s.stats.total.buildings, 1);

        s.grid.tiles[0].height = 4.0;
        s.recompute_stats();
        assert_eq!(
            s.check(&Action::AddStory { index: 0 }),
            Err(ActionError::MaxHeight)
        );
        assert_eq!(
            s.check(&Action::AddStory { index: 5 }),
            Err(ActionError::NoBuilding)
        );
    }

    #[test]
    fn test_story_on_wide_counts_both_tiles() {
        let mut s = state(3);
        commit(&mut s, build(0, BuildingType::Commercial, Footprint::Wide)).unwrap();
        s.advance_construction(1.0);
        commit(&mut s, Action::AddStory { index: 0 }).unwrap();
        assert_eq!(s.stats.total.stories, 4);
        assert_eq!(s.stats.of_type(BuildingType::Commercial).stories, 4);
    }

    #[test]
    fn test_refused_build_never_mutates() {
        let mut s = state(3);
        commit(&mut s, build(4, BuildingType::Residential, Footprint::Single)).unwrap();
        let before = s.grid.clone();
        let _ = s.apply(&build(4, BuildingType::Commercial, Footprint::Single));
        let _ = s.apply(&build(2, BuildingType::Commercial, Footprint::Quad));
        assert_eq!(s.grid, before);
    }
}
