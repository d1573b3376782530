//! Smoothed frames-per-second readout.

use bevy::prelude::*;

use crate::config::{FPS_SMOOTHING_FRAMES, FPS_UPDATE_INTERVAL, TARGET_DT, TARGET_FPS};

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FrameClock {
    /// Running estimate, updated every frame.
    pub fps: f32,
    /// Value to show on screen, refreshed a few times a second.
    pub displayed_fps: f32,
    frames: u32,
    since_display: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            displayed_fps: TARGET_FPS,
            frames: 0,
            since_display: 0.0,
        }
    }
}

impl FrameClock {
    /// Folds in one frame lasting `dt` seconds.
    pub fn record(&mut self, dt: f32) {
        let dt = if dt > 0.0 && dt.is_finite() { dt } else { TARGET_DT };
        self.frames = self.frames.saturating_add(1);
        let n = self.frames.min(FPS_SMOOTHING_FRAMES) as f32;
        self.fps = n * self.fps / (dt * self.fps + n - 1.0);

        self.since_display += dt;
        if self.since_display >= FPS_UPDATE_INTERVAL {
            self.since_display = 0.0;
            self.displayed_fps = self.fps;
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }
}
