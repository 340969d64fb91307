//! Pixel Invaders - a fixed-formation arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (formation, barriers, collisions, game state)
//! - `renderer`: Read-only frame snapshots and presentation backends
//! - `audio`: Fire-and-forget sound sink fed from simulation events
//! - `platform`: Input, storage and timing abstraction
//! - `tuning`: Data-driven game balance
//! - `web`: Browser entry point (wasm only)

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Game;
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the arcade refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed into the accumulator in one frame (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Play field (portrait, 224x256 arcade screen scaled 2.5x)
    pub const CANVAS_WIDTH: f32 = 560.0;
    pub const CANVAS_HEIGHT: f32 = 640.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 20.0;
    /// Gap between the ship and the bottom edge
    pub const PLAYER_BOTTOM_GAP: f32 = 20.0;

    /// Enemy sprites (11x8 / 11x8 / 12x8 pixels at 2x)
    pub const TOP_ENEMY_SIZE: (f32, f32) = (22.0, 16.0);
    pub const MIDDLE_ENEMY_SIZE: (f32, f32) = (22.0, 16.0);
    pub const BOTTOM_ENEMY_SIZE: (f32, f32) = (24.0, 16.0);

    /// Projectiles
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;

    /// Mystery flyer (16x7 pixels at 2x)
    pub const BONUS_WIDTH: f32 = 32.0;
    pub const BONUS_HEIGHT: f32 = 14.0;
    pub const BONUS_Y: f32 = 50.0;
    /// Spawn x when entering from the left / right
    pub const BONUS_SPAWN_LEFT_X: f32 = -50.0;
    pub const BONUS_SPAWN_RIGHT_X: f32 = CANVAS_WIDTH + 10.0;

    /// Barriers
    pub const BARRIER_COUNT: usize = 4;
    pub const BARRIER_Y: f32 = 470.0;
    pub const BARRIER_CELL_SIZE: f32 = 4.0;

    /// Falling power-up capsules
    pub const POWERUP_SIZE: f32 = 20.0;
}

/// Spawn point of the player ship (top-left corner)
#[inline]
pub fn player_spawn_point() -> Vec2 {
    use consts::*;
    Vec2::new(
        CANVAS_WIDTH / 2.0 - PLAYER_WIDTH / 2.0,
        CANVAS_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_GAP,
    )
}
