//! Per-frame ordering of the simulation via `SystemSet` phases.
//!
//! ```text
//! Input  →  Tick  →  Report
//! ```
//!
//! * **Input** – Apply `PlayerCommand`s and resolve pending selection locks.
//!   Collaborators that turn devices into commands run `.before(Input)`.
//! * **Tick** – Feed frame time to the scheduler and run every whole tick:
//!   recompute statistics, autoplay, construction.
//! * **Report** – Read-only aggregation: invariant checks, highlight, frame
//!   clock. Rendering and UI consume the results `.after(Report)`.

use bevy::prelude::*;

/// Ordered phases for simulation systems in the `Update` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Input,
    Tick,
    Report,
}
