//! Raw mouse and keyboard input, translated into [`PlayerCommand`] events.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use simulation::autoplay::Autoplay;
use simulation::commands::PlayerCommand;
use simulation::state::SimulationState;

/// Tile under the cursor as last reported to the simulation.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorTile {
    pub index: Option<usize>,
}

/// Set by the UI while a modal window owns the keyboard.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFocus {
    pub menu_open: bool,
}

/// True when the cursor is over an egui panel, or egui is handling a click.
fn pointer_over_ui(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.wants_pointer_input() || ctx.is_pointer_over_area()
}

/// Intersection of a ray with the ground plane (Y = 0) in front of it.
pub fn ground_hit(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y.abs() <= 0.001 {
        return None;
    }
    let t = -origin.y / direction.y;
    (t > 0.0).then(|| origin + direction * t)
}

/// Tile containing a ground point, one world unit per plot.
pub fn tile_at(hit: Vec3, side: usize) -> Option<usize> {
    if hit.x < 0.0 || hit.z < 0.0 {
        return None;
    }
    let (col, row) = (hit.x.floor() as usize, hit.z.floor() as usize);
    (col < side && row < side).then_some(row * side + col)
}

/// Tool index bound to a key: the backquote and digit row.
pub fn tool_key(key: KeyCode) -> Option<u8> {
    let index = match key {
        KeyCode::Backquote | KeyCode::Digit0 => 0,
        KeyCode::Digit1 => 1,
        KeyCode::Digit2 => 2,
        KeyCode::Digit3 => 3,
        KeyCode::Digit4 => 4,
        KeyCode::Digit5 => 5,
        KeyCode::Digit6 => 6,
        KeyCode::Digit7 => 7,
        KeyCode::Digit8 => 8,
        KeyCode::Digit9 => 9,
        _ => return None,
    };
    Some(index)
}

pub fn update_cursor_tile(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    state: Res<SimulationState>,
    mut contexts: EguiContexts,
    mut cursor: ResMut<CursorTile>,
    mut player: EventWriter<PlayerCommand>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };

    let index = if pointer_over_ui(&mut contexts) {
        None
    } else {
        window
            .cursor_position()
            .and_then(|screen_pos| camera.viewport_to_world(cam_transform, screen_pos).ok())
            .and_then(|ray| ground_hit(ray.origin, *ray.direction))
            .and_then(|hit| tile_at(hit, state.side()))
    };

    if cursor.index != index {
        cursor.index = index;
        player.send(PlayerCommand::Hover(index));
    }
}

/// Left click locks the hovered tile, right click backs out.
pub fn pointer_commands(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    mut player: EventWriter<PlayerCommand>,
) {
    if pointer_over_ui(&mut contexts) {
        return;
    }
    if buttons.just_pressed(MouseButton::Left) {
        player.send(PlayerCommand::PointerPressed);
    }
    if buttons.just_pressed(MouseButton::Right) {
        player.send(PlayerCommand::Deny);
    }
}

pub fn keyboard_commands(
    keys: Res<ButtonInput<KeyCode>>,
    autoplay: Res<Autoplay>,
    focus: Res<InputFocus>,
    state: Res<SimulationState>,
    mut player: EventWriter<PlayerCommand>,
) {
    for &key in keys.get_just_pressed() {
        if let Some(index) = tool_key(key) {
            player.send(PlayerCommand::SelectTool(index));
        }
    }

    if keys.just_pressed(KeyCode::Semicolon) && !focus.menu_open {
        player.send(PlayerCommand::ToggleAutoplay);
    }
    // An unknown boot map leaves a 0-side board with nothing to pause.
    if keys.just_pressed(KeyCode::KeyP) && state.side() > 0 {
        player.send(PlayerCommand::TogglePause);
    }

    // Held E keeps confirming, so the player can paint several plots.
    if !autoplay.enabled {
        if keys.any_just_pressed([KeyCode::KeyE, KeyCode::Enter]) {
            player.send(PlayerCommand::Confirm { held: false });
        } else if keys.pressed(KeyCode::KeyE) {
            player.send(PlayerCommand::Confirm { held: true });
        }
    }

    let shifts = [KeyCode::ShiftLeft, KeyCode::ShiftRight];
    if keys.any_just_pressed(shifts) || keys.any_just_released(shifts) {
        player.send(PlayerCommand::SetFast(keys.any_pressed(shifts)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::event::Events;
    use simulation::grid::CityGrid;
    use simulation::state::EngineRules;

    fn keyboard_app(autoplay: bool) -> App {
        let mut app = App::new();
        app.add_event::<PlayerCommand>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<InputFocus>()
            .insert_resource(Autoplay {
                enabled: autoplay,
                fast: false,
            })
            .insert_resource(SimulationState::new(CityGrid::new(3), EngineRules::default()))
            .add_systems(Update, keyboard_commands);
        app
    }

    fn press(app: &mut App, key: KeyCode) -> Vec<PlayerCommand> {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
        app.update();
        let sent = app
            .world()
            .resource::<Events<PlayerCommand>>()
            .iter_current_update_events()
            .cloned()
            .collect();
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(key);
        keys.clear();
        sent
    }

    #[test]
    fn test_ground_hit_below_camera() {
        let hit = ground_hit(Vec3::new(1.0, 10.0, 1.0), Vec3::new(0.0, -1.0, 0.0)).unwrap();
        assert_eq!(hit, Vec3::new(1.0, 0.0, 1.0));
        assert!(ground_hit(Vec3::new(0.0, 10.0, 0.0), Vec3::Y).is_none());
        assert!(ground_hit(Vec3::new(0.0, 10.0, 0.0), Vec3::X).is_none());
    }

    #[test]
    fn test_tile_at_maps_plots_row_major() {
        assert_eq!(tile_at(Vec3::new(0.5, 0.0, 0.5), 3), Some(0));
        assert_eq!(tile_at(Vec3::new(2.9, 0.0, 1.1), 3), Some(5));
        assert_eq!(tile_at(Vec3::new(3.0, 0.0, 0.0), 3), None);
        assert_eq!(tile_at(Vec3::new(-0.1, 0.0, 0.0), 3), None);
    }

    #[test]
    fn test_tool_keys() {
        assert_eq!(tool_key(KeyCode::Backquote), Some(0));
        assert_eq!(tool_key(KeyCode::Digit0), Some(0));
        assert_eq!(tool_key(KeyCode::Digit7), Some(7));
        assert_eq!(tool_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_keys_become_commands() {
        let mut app = keyboard_app(false);
        assert_eq!(press(&mut app, KeyCode::Digit2), vec![PlayerCommand::SelectTool(2)]);
        assert_eq!(press(&mut app, KeyCode::KeyE), vec![PlayerCommand::Confirm { held: false }]);
        assert_eq!(press(&mut app, KeyCode::KeyP), vec![PlayerCommand::TogglePause]);
        assert_eq!(
            press(&mut app, KeyCode::Semicolon),
            vec![PlayerCommand::ToggleAutoplay]
        );
        assert_eq!(
            press(&mut app, KeyCode::ShiftLeft),
            vec![PlayerCommand::SetFast(true)]
        );
    }

    #[test]
    fn test_held_e_repeats_as_held_confirm() {
        let mut app = keyboard_app(false);
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyE);
        let mut sent = Vec::new();
        for _ in 0..3 {
            app.update();
            sent.extend(
                app.world()
                    .resource::<Events<PlayerCommand>>()
                    .iter_current_update_events()
                    .cloned(),
            );
            app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
        }
        assert_eq!(
            sent,
            vec![
                PlayerCommand::Confirm { held: false },
                PlayerCommand::Confirm { held: true },
                PlayerCommand::Confirm { held: true },
            ]
        );
    }

    #[test]
    fn test_confirm_suppressed_during_autoplay() {
        let mut app = keyboard_app(true);
        assert!(press(&mut app, KeyCode::KeyE).is_empty());
    }

    #[test]
    fn test_autoplay_toggle_ignored_while_menu_open() {
        let mut app = keyboard_app(false);
        app.insert_resource(InputFocus { menu_open: true });
        assert!(press(&mut app, KeyCode::Semicolon).is_empty());
    }
}
