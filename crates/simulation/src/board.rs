//! Mutable access to everything a map load or an action touches, bundled
//! as one system parameter.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::autoplay::Autoplay;
use crate::footprint::Footprint;
use crate::grid::CityGrid;
use crate::map_catalog::{CurrentMap, MapCatalog, MapDef};
use crate::selection::Selection;
use crate::sim_params::SimParams;
use crate::state::{EngineRules, SimulationState};
use crate::tools::ToolState;

#[derive(SystemParam)]
pub struct Board<'w> {
    pub state: ResMut<'w, SimulationState>,
    pub tools: ResMut<'w, ToolState>,
    pub selection: ResMut<'w, Selection>,
    pub current: ResMut<'w, CurrentMap>,
    pub autoplay: ResMut<'w, Autoplay>,
}

impl Board<'_> {
    /// Replaces the city with `def`: fresh grid and statistics, the first
    /// allowed tool selected, nothing hovered or selected.
    pub fn load_map(&mut self, def: &MapDef, category: &str, index: usize, params: &SimParams) {
        let (grid, issues) = CityGrid::from_layout(def.side, def.layout.as_deref(), params.max_height);
        if issues.total() > 0 {
            warn!(
                "Map {}/{} ('{}'): {} malformed tiles decoded as void ({:?})",
                category,
                index,
                def.name,
                issues.total(),
                issues
            );
        }
        let voids = grid
            .tiles
            .iter()
            .filter(|t| t.footprint == Footprint::Void)
            .count();
        let tick = self.state.tick;
        *self.state = SimulationState::new(grid, EngineRules::from(params));
        self.state.tick = tick;

        let allowed = def.allowed_tools();
        self.tools.clear();
        if let Some(first) = allowed.first() {
            self.tools.select(first.index(), &allowed);
        }
        self.selection.clear();
        info!(
            "Loaded map {}/{} '{}': {}x{}, {} plots missing, tools {:?}",
            category,
            index,
            def.name,
            def.side,
            def.side,
            voids,
            allowed.iter().map(|t| t.label()).collect::<Vec<_>>()
        );
        *self.current = CurrentMap {
            category: category.to_string(),
            index,
            name: def.name.clone(),
            allowed,
        };
    }
}

/// Startup: loads the boot map named by [`SimParams`].
pub fn boot_map(catalog: Res<MapCatalog>, params: Res<SimParams>, mut board: Board) {
    let Some(def) = catalog.get(&params.boot_category, params.boot_index) else {
        warn!(
            "Boot map {}/{} not in catalog; starting with an empty board",
            params.boot_category, params.boot_index
        );
        return;
    };
    board.load_map(def, &params.boot_category, params.boot_index, &params);
    board.autoplay.enabled = params.boot_autoplay;
}
