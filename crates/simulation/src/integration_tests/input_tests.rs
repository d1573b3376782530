use crate::actions::{ActionError, ActionLog, ActionResult};
use crate::audio_cues::SfxCue;
use crate::commands::PlayerCommand;
use crate::grid::BuildingType;
use crate::selection::{Highlight, HighlightTone, Selection};
use crate::test_harness::TestTown;
use crate::tools::{ToolKind, ToolState};

#[test]
fn test_press_locks_on_next_frame() {
    let mut town = TestTown::empty(3);
    town.send(PlayerCommand::Hover(Some(4)))
        .send(PlayerCommand::PointerPressed)
        .update();
    assert_eq!(town.resource::<Selection>().selected, None);
    assert!(town.resource::<Selection>().lock_pending);
    town.update();
    assert_eq!(town.resource::<Selection>().selected, Some(4));
    assert!(town.take_cues().iter().any(|c| c.cue == SfxCue::Hover));
}

#[test]
fn test_hover_outside_grid_is_ignored() {
    let mut town = TestTown::empty(3);
    town.send(PlayerCommand::Hover(Some(9))).update();
    assert_eq!(town.resource::<Selection>().hovered, None);
}

#[test]
fn test_deny_clears_tool_and_selection() {
    let mut town = TestTown::empty(3);
    town.place(ToolKind::House, 2);
    town.send(PlayerCommand::Deny).update();
    assert_eq!(town.resource::<Selection>().selected, None);
    assert_eq!(town.resource::<ToolState>().selected, None);

    town.tick();
    town.send(PlayerCommand::Hover(Some(3)))
        .send(PlayerCommand::PointerPressed)
        .update();
    town.send(PlayerCommand::Confirm { held: false }).update();
    assert_eq!(
        town.resource::<ActionLog>().last().map(|e| e.result),
        Some(ActionResult::Refused(ActionError::NoToolSelected))
    );
}

#[test]
fn test_confirm_without_target() {
    let mut town = TestTown::empty(3);
    town.send(PlayerCommand::Confirm { held: false }).update();
    assert_eq!(
        town.resource::<ActionLog>().last().map(|e| e.result),
        Some(ActionResult::Refused(ActionError::NoTarget))
    );
    assert!(town.take_cues().iter().any(|c| c.cue == SfxCue::Error));
}

#[test]
fn test_disallowed_tool_clears_selection() {
    let mut town = TestTown::with_map("tut", 4);
    assert_eq!(town.resource::<ToolState>().selected, Some(ToolKind::Bulldoze));
    town.send(PlayerCommand::SelectTool(ToolKind::Mall.index())).update();
    assert_eq!(town.resource::<ToolState>().selected, None);
    assert_eq!(
        town.resource::<ActionLog>().last().map(|e| e.result),
        Some(ActionResult::Refused(ActionError::ToolUnavailable))
    );
}

#[test]
fn test_doubles_rotate_on_reselect() {
    let mut town = TestTown::empty(3);
    town.send(PlayerCommand::SelectTool(ToolKind::Mart.index())).update();
    let first = town.resource::<ToolState>().footprint();
    town.send(PlayerCommand::SelectTool(ToolKind::Mart.index())).update();
    let second = town.resource::<ToolState>().footprint();
    assert_ne!(first, second);
}

#[test]
fn test_build_cue_matches_building_type() {
    let mut town = TestTown::empty(3);
    town.place(ToolKind::CornerStore, 0);
    let cues = town.take_cues();
    let build = cues.iter().find(|c| matches!(c.cue, SfxCue::Build(_)));
    assert_eq!(build.map(|c| c.cue), Some(SfxCue::Build(BuildingType::Commercial)));
    assert_eq!(build.map(|c| c.volume_scale), Some(1.0));
}

#[test]
fn test_highlight_follows_selection_and_tool() {
    let mut town = TestTown::empty(3);
    town.select_tool(ToolKind::House)
        .send(PlayerCommand::Hover(Some(4)))
        .update();
    let h = *town.resource::<Highlight>();
    assert_eq!(h.target, Some(4));
    assert_eq!(h.tone, HighlightTone::Allowed);

    town.select_tool(ToolKind::Bulldoze).update();
    assert_eq!(town.resource::<Highlight>().tone, HighlightTone::Refused);

    town.select_tool(ToolKind::Apartments).update();
    let h = *town.resource::<Highlight>();
    assert_eq!(h.preview, 3);
    assert_eq!(h.tone, HighlightTone::Allowed);

    town.send(PlayerCommand::Deny).update();
    assert_eq!(town.resource::<Highlight>().tone, HighlightTone::NoTool);
}

#[test]
fn test_held_confirm_refusals_stay_quiet() {
    let mut town = TestTown::empty(3);
    let placed = town.place(ToolKind::House, 4);
    assert!(placed.is_some_and(|r| r.is_applied()));
    town.take_cues();

    for _ in 0..60 {
        town.send(PlayerCommand::Confirm { held: true })
            .advance(std::time::Duration::from_secs_f32(1.0 / 60.0));
    }
    assert!(town.take_cues().iter().all(|c| c.cue != SfxCue::Error));
    assert!(town
        .resource::<ActionLog>()
        .last()
        .is_some_and(|e| e.result.is_applied()));

    // A fresh press on the taken plot is still reported.
    town.send(PlayerCommand::Confirm { held: false }).update();
    assert!(town
        .resource::<ActionLog>()
        .last()
        .is_some_and(|e| !e.result.is_applied()));
    assert_eq!(
        town.take_cues().iter().filter(|c| c.cue == SfxCue::Error).count(),
        1
    );
}
