//! Headless `--headless` mode: runs the autoplay demo with no window for a
//! fixed span of game time, then prints the final city as JSON on stdout.

use std::time::Duration;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use serde::Serialize;

use simulation::actions::{ActionLog, ActionOrigin};
use simulation::config::TARGET_DT;
use simulation::invariant_checks::InvariantViolations;
use simulation::map_catalog::CurrentMap;
use simulation::sim_params::SimParams;
use simulation::state::SimulationState;
use simulation::stats::CityStats;

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub map: String,
    pub seconds: f32,
    pub ticks: u64,
    pub stats: CityStats,
    /// Autoplay actions still held in the action log.
    pub recent_autoplay_actions: usize,
    pub invariant_violations: u32,
}

pub fn build_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            TARGET_DT,
        )));
    // After LogPlugin so a rejected parameter file is reported.
    let mut params = SimParams::from_env();
    params.boot_autoplay = true;
    app.insert_resource(params)
        .add_plugins(simulation::SimulationPlugin);
    app
}

/// Steps the app one target frame at a time until `seconds` of game time
/// have passed.
pub fn run(app: &mut App, seconds: f32) -> HeadlessReport {
    let frames = (seconds / TARGET_DT).ceil() as u64;
    for _ in 0..=frames {
        app.update();
    }

    let world = app.world();
    let state = world.resource::<SimulationState>();
    let log = world.resource::<ActionLog>();
    HeadlessReport {
        map: world.resource::<CurrentMap>().name.clone(),
        seconds,
        ticks: state.tick,
        stats: state.stats,
        recent_autoplay_actions: log
            .last_n(usize::MAX)
            .iter()
            .filter(|e| e.origin == ActionOrigin::Autoplay && e.result.is_applied())
            .count(),
        invariant_violations: world.resource::<InvariantViolations>().total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_demo_builds_a_city() {
        let mut app = build_app();
        let report = run(&mut app, 20.0);
        assert_eq!(report.map, "7x7");
        assert!(report.ticks >= 2390);
        assert!(report.stats.total.buildings > 0);
        assert_eq!(report.invariant_violations, 0);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["stats"]["total"]["buildings"].as_u64().unwrap() > 0);
    }
}
