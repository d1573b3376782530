use bevy::prelude::*;

use simulation::simulation_sets::SimulationSet;

pub mod audio_playback;
pub mod camera;
pub mod input;
pub mod tile_render;

use audio_playback::{AudioSettings, CuesPlayed};
use camera::CameraOrbitDrag;
use input::{CursorTile, InputFocus};
use tile_render::TileVisuals;

/// Draws the city and turns device input into player commands. Needs a
/// window, so it is left out of headless runs.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraOrbitDrag>()
            .init_resource::<CursorTile>()
            .init_resource::<InputFocus>()
            .init_resource::<TileVisuals>()
            .init_resource::<AudioSettings>()
            .init_resource::<CuesPlayed>()
            .add_systems(
                Startup,
                (camera::setup_camera, tile_render::setup_lighting),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_tile,
                    input::pointer_commands,
                    input::keyboard_commands,
                )
                    .before(SimulationSet::Input),
            )
            .add_systems(
                Update,
                (
                    camera::frame_loaded_map,
                    camera::camera_pan_keyboard,
                    camera::camera_orbit_drag,
                    camera::camera_zoom,
                    camera::apply_orbit_camera,
                )
                    .chain()
                    .after(SimulationSet::Report),
            )
            .add_systems(
                Update,
                (
                    tile_render::spawn_tile_entities,
                    tile_render::sync_tile_entities,
                )
                    .chain()
                    .after(SimulationSet::Report),
            )
            .add_systems(PostUpdate, audio_playback::consume_cue_events);
    }
}
