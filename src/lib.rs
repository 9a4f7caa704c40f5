//! Star Strafe - a single-screen side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, tick step, collisions)
//! - `input`: Logical button state fed by keyboard/touch/pointer adapters
//! - `renderer`: Pure world-to-draw-commands scene builder + canvas executor
//! - `settings`: Performance profile and preferences
//! - `platform`: Browser/native host services (clock, capability sniff)

pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use input::{Button, InputState};
pub use settings::{PerfProfile, Settings};

/// Game configuration constants
pub mod consts {
    /// Player craft footprint and handling
    pub const PLAYER_WIDTH: f32 = 20.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Pixels moved per held direction per tick
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Player spawn/reset X
    pub const PLAYER_START_X: f32 = 30.0;
    /// Minimum gap between shots
    pub const SHOT_COOLDOWN_MS: f64 = 200.0;

    /// Bullet footprint and per-tick rightward speed
    pub const BULLET_WIDTH: f32 = 6.0;
    pub const BULLET_HEIGHT: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 5.0;

    /// Enemy footprint
    pub const ENEMY_SIZE: f32 = 30.0;
    /// Enemy leftward speed is BASE + PER_LEVEL * game_speed
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.5;

    /// Per-tick enemy spawn probability: BASE + PER_LEVEL * game_speed
    pub const SPAWN_BASE: f32 = 0.02;
    pub const SPAWN_PER_LEVEL: f32 = 0.01;
    /// Reduced-profile spawn pressure (constrained hosts)
    pub const SPAWN_BASE_REDUCED: f32 = 0.015;
    pub const SPAWN_PER_LEVEL_REDUCED: f32 = 0.007;

    /// Scoring
    pub const SCORE_PER_KILL: u64 = 50;
    pub const SCORE_PER_ESCAPE: u64 = 10;
    /// game_speed = 1 + score / DIFFICULTY_SCORE_STEP
    pub const DIFFICULTY_SCORE_STEP: u64 = 500;

    /// Charge meter
    pub const CHARGE_PER_KILL: u8 = 10;
    pub const CHARGE_MAX: u8 = 100;

    /// Ultimate beam
    pub const ULTIMATE_DURATION_MS: f64 = 1000.0;
    /// Narrow-end height as a fraction of player height
    pub const ULTIMATE_START_HEIGHT_FRAC: f32 = 0.8;
    /// Wide-end height as a fraction of play-area height
    pub const ULTIMATE_END_HEIGHT_FRAC: f32 = 0.5;
}
