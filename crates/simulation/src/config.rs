/// The number that may never show up in the city statistics.
pub const FORBIDDEN_DIVISOR: u32 = 13;

/// Tallest building on any map, in stories. Must stay below 15 so a height
/// fits in one hex digit of the map layout format.
pub const MAX_HEIGHT: u8 = 4;

/// Height added when construction of a building or story starts.
pub const CONSTRUCTION_STEP: f32 = 0.05;
/// Stories per second that an under-construction tile rises.
pub const CONSTRUCTION_RATE: f32 = 2.0;

pub const TARGET_FPS: f32 = 60.0;
pub const TARGET_DT: f32 = 1.0 / TARGET_FPS;
/// Simulation ticks per second (two ticks per target frame).
pub const TICK_HZ: u32 = 120;
/// Upper bound on unsimulated time carried between frames, in seconds.
pub const MAX_FRAME_BACKLOG: f32 = 0.1;

pub const FPS_SMOOTHING_FRAMES: u32 = 5;
pub const FPS_UPDATE_INTERVAL: f32 = 0.25;

/// Autoplay acts every this many ticks.
pub const AUTOPLAY_INTERVAL_TICKS: u64 = 30;
/// Autoplay picks a fresh tool every this many ticks.
pub const AUTOPLAY_RETOOL_TICKS: u64 = 120;
pub const AUTOPLAY_ATTEMPTS: u32 = 10;
/// Divides both autoplay cadences while "fast" is held.
pub const AUTOPLAY_FAST_FACTOR: u64 = 6;
/// Autoplay sounds play at this fraction of the player's volume.
pub const AUTOPLAY_VOLUME: f32 = 0.5;
