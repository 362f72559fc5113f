//! Ocean Cleanup - a small arcade game about sweeping garbage out of the sea
//!
//! Core modules:
//! - `sim`: Deterministic simulation (garbage drift, player movement, collisions, session state)
//! - `session`: Session controller owning the game state and its scheduled loops
//! - `platform`: Scheduling and input abstraction (browser and in-memory)
//! - `renderer`: Scene description and Canvas2D backend
//! - `ui`: Score/time/game-over status sink

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use session::{SessionController, StartError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Number of garbage pieces in play
    pub const GARBAGE_COUNT: usize = 5;
    /// Leftward drift per tick
    pub const GARBAGE_DRIFT: f32 = 3.5;
    /// Chance per tick that a piece grows or shrinks
    pub const GARBAGE_RESIZE_CHANCE: f64 = 0.05;
    /// Largest single resize step (either direction)
    pub const GARBAGE_RESIZE_STEP: i32 = 4;
    /// Radius limits while drifting
    pub const GARBAGE_MIN_RADIUS: u32 = 15;
    pub const GARBAGE_MAX_RADIUS: u32 = 40;
    /// Radius range for a freshly respawned piece
    pub const GARBAGE_SPAWN_MIN_RADIUS: u32 = 20;
    pub const GARBAGE_SPAWN_MAX_RADIUS: u32 = 35;
    /// Radius of a piece before it ever respawns
    pub const GARBAGE_INITIAL_RADIUS: u32 = 25;
    /// Respawn column (right edge)
    pub const GARBAGE_SPAWN_X: f32 = 760.0;
    /// Vertical spawn band
    pub const GARBAGE_SPAWN_MIN_Y: i32 = 200;
    pub const GARBAGE_SPAWN_MAX_Y: i32 = 480;
    /// Outline width
    pub const GARBAGE_LINE_WIDTH: f32 = 2.5;

    /// Player start position
    pub const PLAYER_START_X: f32 = 10.0;
    pub const PLAYER_START_Y: f32 = 200.0;
    /// Player movement bounds (top-left corner of the sprite)
    pub const PLAYER_MIN_X: f32 = 10.0;
    pub const PLAYER_MAX_X: f32 = 700.0;
    pub const PLAYER_MIN_Y: f32 = 110.0;
    pub const PLAYER_MAX_Y: f32 = 380.0;
    /// Speed along the active axis
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Sprite size in pixels
    pub const SPRITE_WIDTH: f32 = 90.0;
    pub const SPRITE_HEIGHT: f32 = 120.0;
    /// Moving ticks between sprite frame toggles
    pub const ANIMATION_PERIOD: u32 = 5;

    /// Offset from the sprite corner to its reference point
    pub const REACH_OFFSET_X: f32 = 45.0;
    pub const REACH_OFFSET_Y: f32 = 60.0;
    /// Collection window half-extents around the reference point
    pub const REACH_X: f32 = 50.0;
    pub const REACH_Y: f32 = 60.0;

    /// Allowed session lengths in seconds
    pub const SESSION_DURATIONS: [u32; 2] = [30, 60];
    /// Timer loop period in milliseconds
    pub const TIMER_PERIOD_MS: i32 = 1000;
}

/// Clamp a point into an axis-aligned box
#[inline]
pub fn clamp_to_box(pos: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    pos.clamp(min, max)
}
