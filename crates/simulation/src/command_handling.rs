//! Applies player intents to the board.

use bevy::prelude::*;

use crate::actions::{ActionError, ActionLog, ActionOrigin, ActionResult, AppliedAction, LoggedAction};
use crate::audio_cues::{PlayCueEvent, SfxCue};
use crate::board::Board;
use crate::commands::PlayerCommand;
use crate::map_catalog::MapCatalog;
use crate::scheduler::TickScheduler;
use crate::sim_params::SimParams;
use crate::tools::ToolKind;

/// Locks the selection requested by last frame's pointer press.
pub fn resolve_pending_lock(mut board: Board, mut cues: EventWriter<PlayCueEvent>) {
    if board.autoplay.enabled {
        board.selection.lock_pending = false;
        return;
    }
    if board.selection.resolve_lock().is_some() {
        cues.send(PlayCueEvent::new(SfxCue::Hover));
    }
}

/// Confirms the selected tool on the selected tile.
pub fn confirm(board: &mut Board) -> Result<AppliedAction, ActionError> {
    if board.autoplay.enabled {
        return Err(ActionError::AutoplayActive);
    }
    let tool = board.tools.selected.ok_or(ActionError::NoToolSelected)?;
    let target = board.selection.selected.ok_or(ActionError::NoTarget)?;
    let action = tool.action_at(target, board.tools.selections);
    board.state.apply(&action)
}

pub fn handle_player_commands(
    mut commands: EventReader<PlayerCommand>,
    mut board: Board,
    catalog: Res<MapCatalog>,
    params: Res<SimParams>,
    mut scheduler: ResMut<TickScheduler>,
    mut cues: EventWriter<PlayCueEvent>,
    mut log: ResMut<ActionLog>,
) {
    for command in commands.read() {
        match command {
            PlayerCommand::SelectTool(index) => {
                let requested = ToolKind::from_index(*index);
                if board.autoplay.enabled {
                    log.push(player_entry(&board, requested, None, ActionError::AutoplayActive.into()));
                    continue;
                }
                let allowed = board.current.allowed.clone();
                cues.send(PlayCueEvent::new(SfxCue::Select));
                if board.tools.select(*index, &allowed).is_none() {
                    debug!("Tool {} is not available on this map", index);
                    log.push(player_entry(&board, requested, None, ActionError::ToolUnavailable.into()));
                }
            }
            PlayerCommand::Confirm { held } => {
                let tool = board.tools.selected;
                let target = board.selection.selected;
                let result = confirm(&mut board);
                if *held && result.is_err() {
                    continue;
                }
                match &result {
                    Ok(applied) => {
                        debug!("Player applied {:?}", applied);
                        cues.send(PlayCueEvent::new(applied.cue()));
                    }
                    Err(e) => {
                        debug!("Player action refused: {:?} (tool {:?}, tile {:?})", e, tool, target);
                        cues.send(PlayCueEvent::new(SfxCue::Error));
                    }
                }
                log.push(player_entry(&board, tool, target, result.into()));
            }
            PlayerCommand::Deny => {
                board.selection.selected = None;
                board.selection.lock_pending = false;
                board.tools.clear();
            }
            PlayerCommand::PointerPressed => {
                if !board.autoplay.enabled {
                    board.selection.lock_pending = true;
                }
            }
            PlayerCommand::Hover(hovered) => {
                let len = board.state.grid.len();
                board.selection.hovered = (*hovered).filter(|&i| i < len);
            }
            PlayerCommand::ToggleAutoplay => {
                board.autoplay.enabled = !board.autoplay.enabled;
                board.selection.selected = None;
                board.selection.lock_pending = false;
                info!("Autoplay {}", if board.autoplay.enabled { "on" } else { "off" });
            }
            PlayerCommand::SetFast(fast) => {
                board.autoplay.fast = *fast;
            }
            PlayerCommand::TogglePause => {
                scheduler.toggle_pause();
                info!("Simulation {}", if scheduler.paused { "paused" } else { "resumed" });
            }
            PlayerCommand::LoadMap { category, index } => {
                let Some(def) = catalog.get(category, *index) else {
                    warn!("No map {}/{} in the catalog", category, index);
                    continue;
                };
                board.load_map(def, category, *index, &params);
                board.autoplay.enabled = false;
            }
        }
    }
}

fn player_entry(
    board: &Board,
    tool: Option<ToolKind>,
    target: Option<usize>,
    result: ActionResult,
) -> LoggedAction {
    LoggedAction {
        tick: board.state.tick,
        origin: ActionOrigin::Player,
        tool,
        target,
        result,
    }
}
