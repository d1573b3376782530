//! One plot slab and one building block per tile, kept in sync with the
//! simulation snapshot and the current highlight.

use bevy::prelude::*;

use simulation::footprint::Footprint;
use simulation::map_catalog::CurrentMap;
use simulation::selection::Highlight;
use simulation::snapshot::TileInstance;
use simulation::state::SimulationState;

/// World height of one story.
pub const STORY_HEIGHT: f32 = 0.6;
/// Gap left around a building inside its plot(s), in world units.
const PLOT_MARGIN: f32 = 0.12;
const PLOT_THICKNESS: f32 = 0.05;

const PLOT_RGB: [f32; 3] = [0.42, 0.55, 0.36];
const RESIDENTIAL_RGB: [f32; 3] = [0.86, 0.58, 0.38];
const COMMERCIAL_RGB: [f32; 3] = [0.38, 0.58, 0.86];
/// Share of the highlight colour mixed into a highlighted building.
const HIGHLIGHT_MIX: f32 = 0.5;
/// Share of white mixed into a building while a story is rising.
const CONSTRUCTION_MIX: f32 = 0.4;

#[derive(Component, Debug, Clone, Copy)]
pub struct PlotSlab {
    pub index: usize,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct BuildingBlock {
    pub index: usize,
}

/// Shared mesh and the side the current entities were spawned for.
#[derive(Resource, Default)]
pub struct TileVisuals {
    pub side: usize,
    cube: Option<Handle<Mesh>>,
}

pub fn setup_lighting(mut commands: Commands) {
    commands.insert_resource(ClearColor(Color::srgb(0.53, 0.72, 0.86)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 350.0,
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 9000.0,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Rebuilds every tile entity when a map is loaded.
pub fn spawn_tile_entities(
    mut commands: Commands,
    current: Res<CurrentMap>,
    state: Res<SimulationState>,
    mut visuals: ResMut<TileVisuals>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    existing: Query<Entity, Or<(With<PlotSlab>, With<BuildingBlock>)>>,
) {
    let side = state.side();
    if !current.is_changed() && visuals.side == side {
        return;
    }
    for entity in &existing {
        commands.entity(entity).despawn();
    }

    let cube = visuals
        .cube
        .get_or_insert_with(|| meshes.add(Cuboid::new(1.0, 1.0, 1.0)))
        .clone();
    for index in 0..state.grid.len() {
        let (col, row) = state.grid.coords(index);
        commands.spawn((
            PlotSlab { index },
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::from(rgb(PLOT_RGB)))),
            slab_transform(col, row),
        ));
        commands.spawn((
            BuildingBlock { index },
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(StandardMaterial::from(rgb(RESIDENTIAL_RGB)))),
            Transform::default(),
            Visibility::Hidden,
        ));
    }
    visuals.side = side;
    debug!("spawned tile entities for a {side}x{side} map");
}

/// Pushes heights, footprints and highlight colours onto the tile entities.
pub fn sync_tile_entities(
    state: Res<SimulationState>,
    highlight: Res<Highlight>,
    visuals: Res<TileVisuals>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut plots: Query<
        (&PlotSlab, &MeshMaterial3d<StandardMaterial>, &mut Visibility),
        Without<BuildingBlock>,
    >,
    mut blocks: Query<
        (
            &BuildingBlock,
            &MeshMaterial3d<StandardMaterial>,
            &mut Transform,
            &mut Visibility,
        ),
        Without<PlotSlab>,
    >,
) {
    if !state.is_changed() && !highlight.is_changed() && !visuals.is_changed() {
        return;
    }
    let instances = state.instances();
    let side = state.side();
    let lit = highlighted_cells(&highlight, side);
    let tone = highlight.tone.rgb();

    for (plot, material, mut visibility) in &mut plots {
        let Some(instance) = instances.get(plot.index) else {
            continue;
        };
        *visibility = if instance.is_void() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        let color = if lit.contains(&plot.index) { tone } else { PLOT_RGB };
        set_color(&mut materials, material, color);
    }

    for (block, material, mut transform, mut visibility) in &mut blocks {
        let Some(instance) = instances.get(block.index) else {
            continue;
        };
        let (col, row) = (block.index % side.max(1), block.index / side.max(1));
        match building_transform(col, row, instance) {
            Some(t) => {
                *transform = t;
                *visibility = Visibility::Inherited;
                let lit = highlight.target == Some(block.index);
                set_color(&mut materials, material, building_color(instance, lit.then_some(tone)));
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn set_color(
    materials: &mut Assets<StandardMaterial>,
    material: &MeshMaterial3d<StandardMaterial>,
    color: [f32; 3],
) {
    let color = rgb(color);
    if materials.get(&material.0).is_some_and(|m| m.base_color == color) {
        return;
    }
    if let Some(m) = materials.get_mut(&material.0) {
        m.base_color = color;
    }
}

fn rgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

fn slab_transform(col: usize, row: usize) -> Transform {
    let size = 1.0 - PLOT_MARGIN;
    Transform::from_xyz(col as f32 + 0.5, -PLOT_THICKNESS / 2.0, row as f32 + 0.5)
        .with_scale(Vec3::new(size, PLOT_THICKNESS, size))
}

fn anchor_footprint(instance: &TileInstance) -> Option<Footprint> {
    u8::try_from(instance.footprint)
        .ok()
        .map(Footprint::from_shape_bits)
}

/// Box covering every plot of the building anchored at `(col, row)`, or
/// `None` when nothing stands there.
pub fn building_transform(col: usize, row: usize, instance: &TileInstance) -> Option<Transform> {
    if instance.kind <= 0 || instance.height <= 0.0 {
        return None;
    }
    let footprint = anchor_footprint(instance)?;
    let span_x = if footprint.extends_x() { 2.0 } else { 1.0 };
    let span_z = if footprint.extends_z() { 2.0 } else { 1.0 };
    let height = instance.height * STORY_HEIGHT;
    Some(
        Transform::from_xyz(
            col as f32 + span_x / 2.0,
            height / 2.0,
            row as f32 + span_z / 2.0,
        )
        .with_scale(Vec3::new(
            span_x - 2.0 * PLOT_MARGIN,
            height,
            span_z - 2.0 * PLOT_MARGIN,
        )),
    )
}

pub fn building_color(instance: &TileInstance, highlight: Option<[f32; 3]>) -> [f32; 3] {
    let mut color = match instance.kind {
        2 => COMMERCIAL_RGB,
        _ => RESIDENTIAL_RGB,
    };
    if instance.height != instance.height.ceil() {
        color = mix(color, [1.0, 1.0, 1.0], CONSTRUCTION_MIX);
    }
    if let Some(tone) = highlight {
        color = mix(color, tone, HIGHLIGHT_MIX);
    }
    color
}

/// Plots to tint: the target and, for a multi-plot preview, the plots the
/// footprint would cover.
pub fn highlighted_cells(highlight: &Highlight, side: usize) -> Vec<usize> {
    let Some(target) = highlight.target else {
        return Vec::new();
    };
    let mut cells = vec![target];
    let preview = u8::try_from(highlight.preview)
        .ok()
        .map(Footprint::from_shape_bits);
    if let Some((claimed, n)) = preview.and_then(|f| f.claimed_cells(target, side)) {
        cells.extend_from_slice(&claimed[..n]);
    }
    cells
}
