//! # TestTown: headless integration test harness
//!
//! Wraps `bevy::app::App` + `SimulationPlugin` without a window or renderer.
//! Frame time is never taken from the wall clock; tests push simulated time
//! explicitly with [`TestTown::advance`] and [`TestTown::tick`].

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::actions::{ActionLog, ActionResult};
use crate::audio_cues::PlayCueEvent;
use crate::commands::PlayerCommand;
use crate::grid::Tile;
use crate::map_catalog::{MapCatalog, MapCategory, MapDef};
use crate::scheduler::TickScheduler;
use crate::sim_params::SimParams;
use crate::simulation_sets::SimulationSet;
use crate::state::SimulationState;
use crate::stats::CityStats;
use crate::tools::{ToolKind, ToolState};
use crate::SimulationPlugin;

/// Every cue emitted since the last [`TestTown::take_cues`].
#[derive(Resource, Default)]
struct CueRecorder(Vec<PlayCueEvent>);

fn record_cues(mut reader: EventReader<PlayCueEvent>, mut recorder: ResMut<CueRecorder>) {
    recorder.0.extend(reader.read().copied());
}

pub struct TestTown {
    app: App,
}

impl Default for TestTown {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTown {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Boots exactly like the game: built-in catalog, `canvas/7x7`, autoplay on.
    pub fn new() -> Self {
        Self::with_setup(SimParams::default(), MapCatalog::builtin())
    }

    pub fn with_setup(params: SimParams, catalog: MapCatalog) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app.insert_resource(params);
        app.insert_resource(catalog);
        app.add_plugins(SimulationPlugin);
        app.init_resource::<CueRecorder>();
        app.add_systems(Update, record_cues.after(SimulationSet::Report));

        // Run one update so the boot map loads.
        app.update();
        Self { app }
    }

    /// Boots, then loads a built-in map the way the level picker does.
    pub fn with_map(category: &str, index: usize) -> Self {
        let mut town = Self::new();
        town.send(PlayerCommand::LoadMap {
            category: category.to_string(),
            index,
        });
        town.update();
        town
    }

    /// A single custom map with autoplay off.
    pub fn with_layout(side: usize, layout: Option<&str>, tools: Option<&[u8]>) -> Self {
        let catalog = MapCatalog {
            categories: vec![MapCategory {
                name: "test".to_string(),
                maps: vec![MapDef {
                    name: "test".to_string(),
                    side,
                    layout: layout.map(str::to_string),
                    tools: tools.map(<[u8]>::to_vec),
                }],
            }],
        };
        let params = SimParams {
            boot_category: "test".to_string(),
            boot_index: 0,
            boot_autoplay: false,
            ..SimParams::default()
        };
        Self::with_setup(params, catalog)
    }

    /// An empty `side` x `side` board, every tool allowed, autoplay off.
    pub fn empty(side: usize) -> Self {
        Self::with_layout(side, None, None)
    }

    // -----------------------------------------------------------------------
    // Driving the app
    // -----------------------------------------------------------------------

    pub fn send(&mut self, command: PlayerCommand) -> &mut Self {
        self.app.world_mut().send_event(command);
        self
    }

    /// One frame with no simulated time passing.
    pub fn update(&mut self) -> &mut Self {
        self.app.update();
        self
    }

    /// One frame lasting `dt`.
    pub fn advance(&mut self, dt: Duration) -> &mut Self {
        self.app
            .world_mut()
            .resource_mut::<TickScheduler>()
            .push_frame(dt);
        self.app.update();
        self
    }

    /// One frame lasting exactly one tick.
    pub fn tick(&mut self) -> &mut Self {
        let step = self.resource::<TickScheduler>().step();
        self.advance(step)
    }

    pub fn ticks(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.tick();
        }
        self
    }

    /// Selects `tool` unless it already is. Re-selecting rotates doubles.
    pub fn select_tool(&mut self, tool: ToolKind) -> &mut Self {
        if self.resource::<ToolState>().selected != Some(tool) {
            self.send(PlayerCommand::SelectTool(tool.index()));
        }
        self
    }

    /// Hovers and clicks `index`, then confirms `tool` on it. Returns the
    /// logged result of the confirm.
    pub fn place(&mut self, tool: ToolKind, index: usize) -> Option<ActionResult> {
        self.select_tool(tool)
            .send(PlayerCommand::Hover(Some(index)))
            .send(PlayerCommand::PointerPressed)
            .update();
        self.send(PlayerCommand::Confirm { held: false }).update();
        self.resource::<ActionLog>().last().map(|entry| entry.result)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn state(&self) -> &SimulationState {
        self.resource::<SimulationState>()
    }

    pub fn stats(&self) -> &CityStats {
        &self.state().stats
    }

    pub fn tile(&self, index: usize) -> Tile {
        self.state().grid.tiles[index]
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn resource_mut<T: Resource>(&mut self) -> Mut<'_, T> {
        self.app.world_mut().resource_mut::<T>()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Drains the cues recorded so far.
    pub fn take_cues(&mut self) -> Vec<PlayCueEvent> {
        std::mem::take(&mut self.app.world_mut().resource_mut::<CueRecorder>().0)
    }
}
