//! Demo mode: the city builds itself through the same engine the player uses.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::actions::AppliedAction;
use crate::selection::Selection;
use crate::sim_params::SimParams;
use crate::state::SimulationState;
use crate::tools::{ToolKind, ToolState};

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Autoplay {
    pub enabled: bool,
    /// Speeds both cadences up while held.
    pub fast: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayCadence {
    pub interval: u64,
    pub retool: u64,
    pub attempts: u32,
    pub fast_factor: u64,
}

impl From<&SimParams> for AutoplayCadence {
    fn from(params: &SimParams) -> Self {
        Self {
            interval: params.autoplay_interval_ticks,
            retool: params.autoplay_retool_ticks,
            attempts: params.autoplay_attempts,
            fast_factor: params.autoplay_fast_factor,
        }
    }
}

impl AutoplayCadence {
    fn scaled(&self, ticks: u64, fast: bool) -> u64 {
        let factor = if fast { self.fast_factor.max(1) } else { 1 };
        (ticks / factor).max(1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoplayOutcome {
    pub applied: Option<AppliedAction>,
    /// Set when a new tool was picked; the inner value is the pick.
    pub retooled: Option<Option<ToolKind>>,
}

/// Runs one autoplay turn if this tick is on the cadence. Expects fresh
/// statistics, so call it right after the tick's recompute.
pub fn autoplay_turn<R: Rng + ?Sized>(
    autoplay: &Autoplay,
    cadence: &AutoplayCadence,
    state: &mut SimulationState,
    tools: &mut ToolState,
    selection: &mut Selection,
    allowed: &[ToolKind],
    rng: &mut R,
) -> Option<AutoplayOutcome> {
    if !autoplay.enabled || state.tick % cadence.scaled(cadence.interval, autoplay.fast) != 0 {
        return None;
    }

    let mut outcome = AutoplayOutcome::default();
    let len = state.grid.len();
    for _ in 0..cadence.attempts {
        if len == 0 {
            break;
        }
        let index = rng.gen_range(0..len);
        if !state.grid.tiles[index].is_plot() {
            continue;
        }
        selection.selected = Some(index);
        let Some(action) = tools.action_at(index) else {
            continue;
        };
        if let Ok(applied) = state.apply(&action) {
            outcome.applied = Some(applied);
            break;
        }
    }

    if state.tick % cadence.scaled(cadence.retool, autoplay.fast) == 0 || outcome.applied.is_none()
    {
        let pick = allowed.choose(rng).copied();
        match pick {
            Some(tool) => {
                tools.select(tool.index(), allowed);
            }
            None => tools.clear(),
        }
        outcome.retooled = Some(pick);
    }
    selection.selected = None;
    Some(outcome)
}
