//! City statistics and frame rate, in a side panel.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::autoplay::Autoplay;
use simulation::constraint::ForbiddenNumber;
use simulation::frame_clock::FrameClock;
use simulation::grid::BuildingType;
use simulation::map_catalog::CurrentMap;
use simulation::scheduler::TickScheduler;
use simulation::sim_params::SimParams;
use simulation::state::SimulationState;
use simulation::stats::{CityStats, SizeClass, Tally};

const NEAR_FORBIDDEN: egui::Color32 = egui::Color32::from_rgb(240, 170, 80);

/// Scope label and tally for each row of the table, city first.
pub fn table_rows(stats: &CityStats) -> Vec<(&'static str, Tally)> {
    std::iter::once(("Total", stats.total))
        .chain(
            BuildingType::ALL
                .into_iter()
                .map(|b| (b.label(), *stats.of_type(b))),
        )
        .collect()
}

/// Values one step short of a forbidden number get flagged, since the
/// next single addition there is refused.
pub fn near_forbidden(oracle: &ForbiddenNumber, value: u32) -> bool {
    value > 0 && oracle.is_forbidden(i64::from(value) + 1)
}

fn cell(ui: &mut egui::Ui, oracle: &ForbiddenNumber, value: u32) {
    let text = egui::RichText::new(value.to_string());
    if near_forbidden(oracle, value) {
        ui.label(text.color(NEAR_FORBIDDEN));
    } else {
        ui.label(text);
    }
}

pub fn stats_panel_ui(
    mut contexts: EguiContexts,
    state: Res<SimulationState>,
    clock: Res<FrameClock>,
    current: Res<CurrentMap>,
    autoplay: Res<Autoplay>,
    scheduler: Res<TickScheduler>,
    params: Res<SimParams>,
) {
    let oracle = params.oracle();
    egui::SidePanel::right("stats")
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(&current.name);
            ui.label(format!("{:.0} fps", clock.displayed_fps));
            ui.label(format!("tick {}", state.tick));
            if scheduler.paused {
                ui.colored_label(NEAR_FORBIDDEN, "paused");
            } else if autoplay.enabled {
                ui.label(if autoplay.fast { "autoplay (fast)" } else { "autoplay" });
            }
            ui.separator();

            egui::Grid::new("stats_table").striped(true).show(ui, |ui| {
                ui.label("");
                ui.strong("bldg");
                ui.strong("story");
                for class in SizeClass::ALL {
                    ui.strong(class.label());
                }
                ui.end_row();

                for (label, tally) in table_rows(&state.stats) {
                    ui.label(label);
                    cell(ui, &oracle, tally.buildings);
                    cell(ui, &oracle, tally.stories);
                    for class in SizeClass::ALL {
                        cell(ui, &oracle, tally.size(class));
                    }
                    ui.end_row();
                }
            });
        });
}
