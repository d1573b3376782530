use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use simulation::map_catalog::CurrentMap;
use simulation::state::SimulationState;

/// Grid cells per second at the default zoom.
const PAN_SPEED: f32 = 6.0;
/// Pan multiplier while Shift is held.
const FAST_PAN: f32 = 3.0;
const ZOOM_SPEED: f32 = 0.15;
const MIN_DISTANCE: f32 = 3.0;
const MAX_DISTANCE: f32 = 200.0;
const MIN_PITCH: f32 = 15.0 * std::f32::consts::PI / 180.0;
const MAX_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbital camera model: camera orbits around a focus point on the ground.
/// Grid column maps to +X and grid row to +Z, one world unit per plot.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    /// Horizontal rotation in radians. The default puts tile 0 at the top of
    /// the screen.
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::framing(1)
    }
}

impl OrbitCamera {
    /// Looks at the centre of a map of `side` plots, far enough back to see
    /// all of it.
    pub fn framing(side: usize) -> Self {
        let half = side as f32 / 2.0;
        Self {
            focus: Vec3::new(half, 0.0, half),
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: 35.0_f32.to_radians(),
            distance: (side as f32 * 1.8 + 4.0).clamp(MIN_DISTANCE, MAX_DISTANCE),
        }
    }
}

#[derive(Resource, Default)]
pub struct CameraOrbitDrag {
    pub dragging: bool,
    pub last_pos: Vec2,
}

pub fn setup_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let (pos, look_at) = orbit_to_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(orbit);
}

/// Keeps the focus over the map.
fn clamp_focus(focus: &mut Vec3, side: usize) {
    let side = side as f32;
    focus.x = focus.x.clamp(0.0, side);
    focus.z = focus.z.clamp(0.0, side);
}

pub(crate) fn orbit_to_transform(orbit: &OrbitCamera) -> (Vec3, Vec3) {
    let x = orbit.distance * orbit.pitch.cos() * orbit.yaw.sin();
    let y = orbit.distance * orbit.pitch.sin();
    let z = orbit.distance * orbit.pitch.cos() * orbit.yaw.cos();
    (orbit.focus + Vec3::new(x, y, z), orbit.focus)
}

/// Re-frames the camera whenever a different map is loaded.
pub fn frame_loaded_map(
    current: Res<CurrentMap>,
    state: Res<SimulationState>,
    mut orbit: ResMut<OrbitCamera>,
) {
    if !current.is_changed() {
        return;
    }
    *orbit = OrbitCamera::framing(state.side());
}

/// System: apply OrbitCamera state to the actual camera Transform each frame.
pub fn apply_orbit_camera(
    orbit: Res<OrbitCamera>,
    mut query: Query<&mut Transform, With<Camera3d>>,
) {
    if !orbit.is_changed() {
        return;
    }
    let (pos, look_at) = orbit_to_transform(&orbit);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// WASD/Arrow keys: pan focus along the ground plane, relative to the view.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    state: Res<SimulationState>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }
    if dir == Vec2::ZERO {
        return;
    }

    let boost = if keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        FAST_PAN
    } else {
        1.0
    };
    let scale = orbit.distance / OrbitCamera::default().distance;
    let delta = PAN_SPEED * boost * scale.sqrt() * time.delta_secs();
    let step = pan_direction(dir.normalize(), orbit.yaw) * delta;
    orbit.focus.x += step.x;
    orbit.focus.z += step.y;
    clamp_focus(&mut orbit.focus, state.side());
}

/// Screen-space direction to ground-plane `(x, z)` under the given yaw.
fn pan_direction(dir: Vec2, yaw: f32) -> Vec2 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec2::new(
        dir.x * cos_yaw + dir.y * sin_yaw,
        -dir.x * sin_yaw + dir.y * cos_yaw,
    )
}

/// Middle-mouse drag: orbit (horizontal = yaw, vertical = pitch).
pub fn camera_orbit_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraOrbitDrag>,
    mut orbit: ResMut<OrbitCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Middle) {
        if let Some(pos) = window.cursor_position() {
            drag.dragging = true;
            drag.last_pos = pos;
        }
    }
    if buttons.just_released(MouseButton::Middle) {
        drag.dragging = false;
    }

    if drag.dragging {
        if let Some(pos) = window.cursor_position() {
            let delta = pos - drag.last_pos;
            orbit.yaw += delta.x * ORBIT_SENSITIVITY;
            orbit.pitch = (orbit.pitch - delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
            drag.last_pos = pos;
        }
    }
}

/// Scroll wheel: zoom (change distance).
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut orbit: ResMut<OrbitCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        orbit.distance = (orbit.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}
