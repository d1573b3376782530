//! The forbidden-number rule: no tracked aggregate may land on zero or on a
//! multiple of the divisor.

use serde::{Deserialize, Serialize};

use crate::config::FORBIDDEN_DIVISOR;
use crate::grid::BuildingType;
use crate::stats::{CityStats, SizeClass, Tally};

/// Names the statistic that an action would push onto a forbidden value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregate {
    TotalBuildings,
    TotalStories,
    TotalSize(SizeClass),
    TypeBuildings(BuildingType),
    TypeStories(BuildingType),
    TypeSize(BuildingType, SizeClass),
}

/// A pending change to the statistics, for one building type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDelta {
    pub building: BuildingType,
    pub buildings: i64,
    pub stories: i64,
    pub size: Option<(SizeClass, i64)>,
}

impl StatDelta {
    pub fn build(building: BuildingType, tiles: u32, class: SizeClass) -> Self {
        let t = i64::from(tiles);
        Self {
            building,
            buildings: t,
            stories: t,
            size: Some((class, 1)),
        }
    }

    pub fn add_story(building: BuildingType, tiles: u32) -> Self {
        Self {
            building,
            buildings: 0,
            stories: i64::from(tiles),
            size: None,
        }
    }

    pub fn demolish(building: BuildingType, tiles: u32, stories: u32, class: SizeClass) -> Self {
        let t = i64::from(tiles);
        Self {
            building,
            buildings: -t,
            stories: -(i64::from(stories) * t),
            size: Some((class, -1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForbiddenNumber {
    pub divisor: u32,
}

impl Default for ForbiddenNumber {
    fn default() -> Self {
        Self {
            divisor: FORBIDDEN_DIVISOR,
        }
    }
}

impl ForbiddenNumber {
    pub fn new(divisor: u32) -> Self {
        Self { divisor }
    }

    /// Zero counts as forbidden, so nothing that is tracked may vanish.
    pub fn is_forbidden(&self, n: i64) -> bool {
        n <= 0 || n % i64::from(self.divisor) == 0
    }

    /// Checks every aggregate the delta touches, against `stats` plus the
    /// delta. Returns the first one that would become forbidden.
    pub fn admits(&self, stats: &CityStats, delta: &StatDelta) -> Result<(), Aggregate> {
        let b = delta.building;
        self.check_tally(
            &stats.total,
            delta,
            Aggregate::TotalBuildings,
            Aggregate::TotalStories,
            Aggregate::TotalSize,
        )?;
        self.check_tally(
            stats.of_type(b),
            delta,
            Aggregate::TypeBuildings(b),
            Aggregate::TypeStories(b),
            |class| Aggregate::TypeSize(b, class),
        )
    }

    fn check_tally(
        &self,
        tally: &Tally,
        delta: &StatDelta,
        buildings: Aggregate,
        stories: Aggregate,
        size: impl Fn(SizeClass) -> Aggregate,
    ) -> Result<(), Aggregate> {
        if delta.buildings != 0 && self.is_forbidden(i64::from(tally.buildings) + delta.buildings) {
            return Err(buildings);
        }
        if delta.stories != 0 && self.is_forbidden(i64::from(tally.stories) + delta.stories) {
            return Err(stories);
        }
        if let Some((class, d)) = delta.size {
            if d != 0 && self.is_forbidden(i64::from(tally.size(class)) + d) {
                return Err(size(class));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(buildings: u32, stories: u32, singles: u32) -> CityStats {
        let tally = Tally {
            buildings,
            stories,
            sizes: [singles, 0, 0],
        };
        CityStats {
            total: tally,
            by_type: [tally, Tally::default()],
        }
    }

    #[test]
    fn test_forbidden_values() {
        let k = ForbiddenNumber::default();
        assert!(k.is_forbidden(0));
        assert!(k.is_forbidden(13));
        assert!(k.is_forbidden(26));
        assert!(!k.is_forbidden(1));
        assert!(!k.is_forbidden(12));
        assert!(!k.is_forbidden(14));
    }

    #[test]
    fn test_thirteenth_single_refused() {
        let k = ForbiddenNumber::default();
        let stats = stats_with(12, 12, 12);
        let delta = StatDelta::build(BuildingType::Residential, 1, SizeClass::Single);
        assert_eq!(k.admits(&stats, &delta), Err(Aggregate::TotalBuildings));
    }

    #[test]
    fn test_double_jumps_over_thirteen() {
        let k = ForbiddenNumber::default();
        let stats = stats_with(12, 12, 12);
        let delta = StatDelta::build(BuildingType::Residential, 2, SizeClass::Double);
        assert_eq!(k.admits(&stats, &delta), Ok(()));
    }

    #[test]
    fn test_first_building_of_type_is_allowed() {
        let k = ForbiddenNumber::default();
        let delta = StatDelta::build(BuildingType::Commercial, 1, SizeClass::Single);
        assert_eq!(k.admits(&CityStats::default(), &delta), Ok(()));
    }

    #[test]
    fn test_last_building_cannot_be_removed() {
        let k = ForbiddenNumber::default();
        let stats = stats_with(1, 1, 1);
        let delta = StatDelta::demolish(BuildingType::Residential, 1, 1, SizeClass::Single);
        assert_eq!(k.admits(&stats, &delta), Err(Aggregate::TotalBuildings));
    }

    #[test]
    fn test_type_scope_checked_after_totals() {
        let k = ForbiddenNumber::default();
        // City-wide numbers are safe, commercial would hit 13 stories.
        let stats = CityStats {
            total: Tally {
                buildings: 20,
                stories: 40,
                sizes: [20, 0, 0],
            },
            by_type: [
                Tally {
                    buildings: 8,
                    stories: 28,
                    sizes: [8, 0, 0],
                },
                Tally {
                    buildings: 12,
                    stories: 12,
                    sizes: [12, 0, 0],
                },
            ],
        };
        let delta = StatDelta::add_story(BuildingType::Commercial, 1);
        assert_eq!(
            k.admits(&stats, &delta),
            Err(Aggregate::TypeStories(BuildingType::Commercial))
        );
    }

    #[test]
    fn test_story_delta_ignores_building_counts() {
        let k = ForbiddenNumber::default();
        // Building count already sits on 13 (loaded preset); stories are fine.
        let stats = stats_with(13, 20, 13);
        let delta = StatDelta::add_story(BuildingType::Residential, 1);
        assert_eq!(k.admits(&stats, &delta), Ok(()));
    }
}
