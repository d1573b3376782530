//! Per-frame systems that turn elapsed time into ticks and publish what the
//! collaborators read.

use bevy::prelude::*;

use crate::actions::{ActionLog, ActionOrigin, ActionResult, LoggedAction};
use crate::audio_cues::PlayCueEvent;
use crate::autoplay::{autoplay_turn, Autoplay, AutoplayCadence};
use crate::board::Board;
use crate::frame_clock::FrameClock;
use crate::scheduler::TickScheduler;
use crate::selection::{Highlight, Selection};
use crate::sim_params::SimParams;
use crate::sim_rng::SimRng;
use crate::state::SimulationState;
use crate::tools::ToolState;

/// Runs every whole tick the frame's time buys: recompute statistics,
/// autoplay, then construction.
pub fn run_simulation_ticks(
    time: Res<Time>,
    mut scheduler: ResMut<TickScheduler>,
    mut board: Board,
    mut rng: ResMut<SimRng>,
    params: Res<SimParams>,
    mut cues: EventWriter<PlayCueEvent>,
    mut log: ResMut<ActionLog>,
) {
    scheduler.push_frame(time.delta());
    let ticks = scheduler.drain();
    let dt = scheduler.step_secs();
    let cadence = AutoplayCadence::from(&*params);

    for _ in 0..ticks {
        board.state.begin_tick();

        let tool = board.tools.selected;
        let outcome = autoplay_turn(
            &board.autoplay,
            &cadence,
            &mut board.state,
            &mut board.tools,
            &mut board.selection,
            &board.current.allowed,
            &mut rng.0,
        );
        if let Some(applied) = outcome.and_then(|o| o.applied) {
            debug!("Autoplay applied {:?}", applied);
            cues.send(PlayCueEvent::with_volume(applied.cue(), params.autoplay_volume));
            log.push(LoggedAction {
                tick: board.state.tick,
                origin: ActionOrigin::Autoplay,
                tool,
                target: Some(applied.index()),
                result: ActionResult::Applied(applied),
            });
        }

        board.state.advance_construction(dt);
    }
}

pub fn refresh_highlight(
    state: Res<SimulationState>,
    tools: Res<ToolState>,
    selection: Res<Selection>,
    autoplay: Res<Autoplay>,
    mut highlight: ResMut<Highlight>,
) {
    let next = Highlight::compute(&state, &tools, &selection, autoplay.enabled);
    if *highlight != next {
        *highlight = next;
    }
}

pub fn update_frame_clock(time: Res<Time>, mut clock: ResMut<FrameClock>) {
    clock.record(time.delta_secs());
}
