//! Level select window. Escape opens and closes it; picking a map loads it
//! and hands control back to the player.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::input::InputFocus;
use simulation::commands::PlayerCommand;
use simulation::map_catalog::{CurrentMap, MapCatalog};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSelect {
    pub open: bool,
}

impl Default for LevelSelect {
    /// The game boots into the demo with the level list showing.
    fn default() -> Self {
        Self { open: true }
    }
}

pub fn toggle_level_select(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut level_select: ResMut<LevelSelect>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }
    if keys.just_pressed(KeyCode::Escape) {
        level_select.open = !level_select.open;
    }
}

/// Mirrors the window state into the input layer.
pub fn sync_input_focus(level_select: Res<LevelSelect>, mut focus: ResMut<InputFocus>) {
    if focus.menu_open != level_select.open {
        focus.menu_open = level_select.open;
    }
}

pub fn level_select_ui(
    mut contexts: EguiContexts,
    catalog: Res<MapCatalog>,
    current: Res<CurrentMap>,
    mut level_select: ResMut<LevelSelect>,
    mut player: EventWriter<PlayerCommand>,
) {
    if !level_select.open {
        return;
    }
    let mut open = true;
    let mut picked = None;
    egui::Window::new("Levels")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(contexts.ctx_mut(), |ui| {
            for category in &catalog.categories {
                ui.strong(&category.name);
                ui.horizontal_wrapped(|ui| {
                    for (index, map) in category.maps.iter().enumerate() {
                        let is_current = current.category == category.name && current.index == index;
                        let label = format!("{} ({}x{})", map.name, map.side, map.side);
                        if ui.selectable_label(is_current, label).clicked() {
                            picked = Some((category.name.clone(), index));
                        }
                    }
                });
                ui.add_space(4.0);
            }
        });

    if let Some((category, index)) = picked {
        player.send(PlayerCommand::LoadMap { category, index });
        open = false;
    }
    if !open {
        level_select.open = false;
    }
}
