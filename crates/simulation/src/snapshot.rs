//! Read-only per-tile view handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::footprint::Footprint;
use crate::state::SimulationState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileInstance {
    pub height: f32,
    /// Building code: 0 none, 1 residential, 2 commercial, -1 void.
    pub kind: i8,
    /// Footprint code: 0..=3 for anchors, -1 when claimed or void.
    pub footprint: i8,
}

impl TileInstance {
    pub const VOID: TileInstance = TileInstance {
        height: -1.0,
        kind: -1,
        footprint: -1,
    };

    pub fn is_void(&self) -> bool {
        self.kind < 0
    }
}

impl SimulationState {
    pub fn instances(&self) -> Vec<TileInstance> {
        self.grid
            .tiles
            .iter()
            .map(|tile| {
                if tile.footprint == Footprint::Void {
                    return TileInstance::VOID;
                }
                TileInstance {
                    height: tile.height,
                    kind: tile.building.map_or(0, |b| b.code()),
                    footprint: tile.footprint.code(),
                }
            })
            .collect()
    }
}
