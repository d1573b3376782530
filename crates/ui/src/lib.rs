use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use simulation::simulation_sets::SimulationSet;

pub mod level_select;
pub mod stats_panel;
pub mod theme;
pub mod toolbar;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<level_select::LevelSelect>()
            .add_systems(Startup, theme::apply_theme)
            .add_systems(
                Update,
                (
                    level_select::toggle_level_select,
                    level_select::sync_input_focus,
                )
                    .chain()
                    .before(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (
                    toolbar::toolbar_ui,
                    stats_panel::stats_panel_ui,
                    level_select::level_select_ui,
                )
                    .chain()
                    .after(SimulationSet::Report),
            );
    }
}
