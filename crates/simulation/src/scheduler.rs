//! Fixed-timestep tick accumulator.
//!
//! Frame time goes in, whole ticks come out. Only the total time pushed
//! matters, never how it was split across frames.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::{MAX_FRAME_BACKLOG, TICK_HZ};

#[derive(Resource, Debug, Clone)]
pub struct TickScheduler {
    accumulator: Duration,
    step: Duration,
    max_backlog: Duration,
    pub paused: bool,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self {
            accumulator: Duration::ZERO,
            step: Duration::from_nanos(1_000_000_000 / u64::from(TICK_HZ)),
            max_backlog: Duration::from_secs_f32(MAX_FRAME_BACKLOG),
            paused: false,
        }
    }
}

impl TickScheduler {
    /// Length of one tick.
    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn step_secs(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// Time waiting to be turned into ticks.
    pub fn backlog(&self) -> Duration {
        self.accumulator
    }

    /// Adds one frame's time. Paused time is dropped, and the backlog never
    /// grows past its cap so a long stall can't trigger a burst of ticks.
    pub fn push_frame(&mut self, dt: Duration) {
        if self.paused {
            return;
        }
        self.accumulator = (self.accumulator + dt).min(self.max_backlog);
    }

    /// Consumes as many whole ticks as the backlog holds.
    pub fn drain(&mut self) -> u32 {
        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.accumulator = Duration::ZERO;
        }
    }
}
