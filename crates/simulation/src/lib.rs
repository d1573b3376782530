use bevy::prelude::*;

pub mod actions;
pub mod audio_cues;
pub mod autoplay;
pub mod board;
pub mod command_handling;
pub mod commands;
pub mod config;
pub mod constraint;
pub mod footprint;
pub mod frame_clock;
pub mod grid;
pub mod invariant_checks;
pub mod map_catalog;
mod placement;
pub mod scheduler;
pub mod selection;
pub mod sim_loop;
pub mod sim_params;
pub mod sim_rng;
pub mod simulation_sets;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod tools;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use actions::ActionLog;
use audio_cues::PlayCueEvent;
use autoplay::Autoplay;
use commands::PlayerCommand;
use frame_clock::FrameClock;
use invariant_checks::InvariantViolations;
use map_catalog::{CurrentMap, MapCatalog};
use scheduler::TickScheduler;
use selection::{Highlight, Selection};
use sim_params::SimParams;
use sim_rng::SimRng;
use simulation_sets::SimulationSet;
use state::SimulationState;
use tools::ToolState;

/// Core of the game: owns the city and advances it. Insert [`SimParams`] or
/// [`MapCatalog`] before adding the plugin to override the defaults.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimParams>();
        if !app.world().contains_resource::<SimRng>() {
            let seed = app.world().resource::<SimParams>().rng_seed;
            app.insert_resource(SimRng::from_seed_u64(seed));
        }

        app.init_resource::<MapCatalog>()
            .init_resource::<CurrentMap>()
            .init_resource::<SimulationState>()
            .init_resource::<ToolState>()
            .init_resource::<Selection>()
            .init_resource::<Highlight>()
            .init_resource::<Autoplay>()
            .init_resource::<TickScheduler>()
            .init_resource::<ActionLog>()
            .init_resource::<FrameClock>()
            .init_resource::<InvariantViolations>()
            .add_event::<PlayerCommand>()
            .add_event::<PlayCueEvent>();

        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Tick,
                SimulationSet::Report,
            )
                .chain(),
        )
        .add_systems(Startup, board::boot_map)
        .add_systems(
            Update,
            (
                command_handling::resolve_pending_lock,
                command_handling::handle_player_commands,
            )
                .chain()
                .in_set(SimulationSet::Input),
        )
        .add_systems(
            Update,
            sim_loop::run_simulation_ticks.in_set(SimulationSet::Tick),
        )
        .add_systems(
            Update,
            (
                invariant_checks::validate_grid,
                sim_loop::refresh_highlight,
                sim_loop::update_frame_clock,
            )
                .in_set(SimulationSet::Report),
        );
    }
}
