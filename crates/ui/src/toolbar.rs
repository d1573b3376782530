//! Bottom tool bar: tool buttons filtered by the map's allow-list, confirm
//! and deny, autoplay, pause, sound, and the latest action's outcome.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::audio_playback::AudioSettings;
use simulation::actions::{ActionError, ActionLog, ActionResult, AppliedAction};
use simulation::autoplay::Autoplay;
use simulation::commands::PlayerCommand;
use simulation::constraint::Aggregate;
use simulation::map_catalog::CurrentMap;
use simulation::scheduler::TickScheduler;
use simulation::tools::{ToolKind, ToolState};

use crate::level_select::LevelSelect;

/// Why an action was refused, worded for the status line.
pub fn refusal_text(error: ActionError) -> String {
    match error {
        ActionError::OutOfBounds | ActionError::NoPlot => "Nothing can be built there".into(),
        ActionError::Occupied => "That plot is taken".into(),
        ActionError::NoBuilding => "There is no building there".into(),
        ActionError::UnderConstruction => "Still under construction".into(),
        ActionError::MaxHeight => "Already as tall as it gets".into(),
        ActionError::FootprintOffGrid => "It does not fit on the map".into(),
        ActionError::FootprintBlocked => "Something is in the way".into(),
        ActionError::Forbidden(aggregate) => format!("Unlucky: {}", aggregate_text(aggregate)),
        ActionError::StaleStatistics => "One thing at a time".into(),
        ActionError::NoToolSelected => "Pick a tool first".into(),
        ActionError::NoTarget => "Pick a plot first".into(),
        ActionError::ToolUnavailable => "That tool is not available here".into(),
        ActionError::AutoplayActive => "The city is building itself".into(),
    }
}

fn aggregate_text(aggregate: Aggregate) -> String {
    match aggregate {
        Aggregate::TotalBuildings => "total buildings".into(),
        Aggregate::TotalStories => "total stories".into(),
        Aggregate::TotalSize(class) => format!("{} buildings", class.label()),
        Aggregate::TypeBuildings(b) => format!("{} buildings", b.label()),
        Aggregate::TypeStories(b) => format!("{} stories", b.label()),
        Aggregate::TypeSize(b, class) => format!("{} {} buildings", b.label(), class.label()),
    }
}

fn applied_text(applied: AppliedAction) -> String {
    match applied {
        AppliedAction::Built { building, .. } => format!("Started a {} building", building.label()),
        AppliedAction::StoryAdded { stories, .. } => format!("Raising story {stories}"),
        AppliedAction::Demolished { building, .. } => {
            format!("Demolished a {} building", building.label())
        }
    }
}

pub fn status_text(result: &ActionResult) -> String {
    match *result {
        ActionResult::Applied(applied) => applied_text(applied),
        ActionResult::Refused(error) => refusal_text(error),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    tools: Res<ToolState>,
    current: Res<CurrentMap>,
    autoplay: Res<Autoplay>,
    scheduler: Res<TickScheduler>,
    log: Res<ActionLog>,
    mut audio: ResMut<AudioSettings>,
    mut level_select: ResMut<LevelSelect>,
    mut player: EventWriter<PlayerCommand>,
) {
    egui::TopBottomPanel::bottom("toolbar").show(contexts.ctx_mut(), |ui| {
        ui.horizontal_wrapped(|ui| {
            for tool in ToolKind::ALL {
                let enabled = current.allowed.contains(&tool) && !autoplay.enabled;
                let selected = tools.selected == Some(tool);
                let label = format!("{} {}", tool.index(), tool.label());
                let response = ui.add_enabled(enabled, egui::SelectableLabel::new(selected, label));
                if response.clicked() {
                    player.send(PlayerCommand::SelectTool(tool.index()));
                }
            }

            ui.separator();
            let manual = !autoplay.enabled;
            if ui.add_enabled(manual, egui::Button::new("Confirm")).clicked() {
                player.send(PlayerCommand::Confirm { held: false });
            }
            if ui.add_enabled(manual, egui::Button::new("Deny")).clicked() {
                player.send(PlayerCommand::Deny);
            }

            ui.separator();
            let mut demo = autoplay.enabled;
            if ui.checkbox(&mut demo, "Autoplay").changed() {
                player.send(PlayerCommand::ToggleAutoplay);
            }
            let pause_label = if scheduler.paused { "Resume" } else { "Pause" };
            if ui.button(pause_label).clicked() {
                player.send(PlayerCommand::TogglePause);
            }
            ui.checkbox(&mut audio.muted, "Mute");
            if ui.button("Levels").clicked() {
                level_select.open = !level_select.open;
            }
        });

        if let Some(entry) = log.last() {
            ui.label(status_text(&entry.result));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::grid::BuildingType;
    use simulation::stats::SizeClass;

    #[test]
    fn test_forbidden_refusal_names_the_statistic() {
        let text = refusal_text(ActionError::Forbidden(Aggregate::TypeSize(
            BuildingType::Commercial,
            SizeClass::Quad,
        )));
        assert!(text.contains("Commercial"));
        assert!(text.contains("2x2"));
    }

    #[test]
    fn test_status_text_for_applied_story() {
        let text = status_text(&ActionResult::Applied(AppliedAction::StoryAdded {
            index: 3,
            stories: 2,
        }));
        assert_eq!(text, "Raising story 2");
    }
}
