//! Break Bricks - a breakout-style arcade simulation
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, level generation, game state)
//! - `platform`: Host shims (frame clock, window letterboxing)
//! - `audio`: Named sound cues with optional playback device
//! - `highscores`: Score submission sink and local leaderboard
//! - `game`: Embeddable facade driven by a host-owned loop

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{Game, RenderSnapshot};
pub use highscores::{ScoreBoard, ScoreSink};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical field size; all simulation coordinates live in this space
    pub const LOGICAL_W: f32 = 800.0;
    pub const LOGICAL_H: f32 = 600.0;
    /// Target frame rate (one simulation tick per frame)
    pub const FPS: f32 = 120.0;
    /// Upper bound on a single tick's delta time (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Paddle defaults
    pub const PADDLE_W: f32 = 110.0;
    pub const PADDLE_H: f32 = 16.0;
    pub const PADDLE_Y: f32 = LOGICAL_H - 60.0;
    pub const PADDLE_ACCEL: f32 = 2200.0;
    pub const PADDLE_MAX_SPEED: f32 = 650.0;
    /// Per-tick multiplicative decay, scaled by dt * FPS
    pub const PADDLE_FRICTION: f32 = 0.000_001;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_SPEED: f32 = 370.0;
    pub const BALL_MAX_SPEED: f32 = 820.0;
    /// Speed bump per brick destroyed
    pub const BALL_SPEED_INC_ON_HIT: f32 = 4.0;
    /// Speed bump per paddle bounce
    pub const BALL_SPEED_INC_ON_PADDLE: f32 = 6.0;
    /// Launch angle range from horizontal (degrees)
    pub const LAUNCH_ANGLE_MIN_DEG: f32 = 45.0;
    pub const LAUNCH_ANGLE_MAX_DEG: f32 = 135.0;
    /// Paddle reflection angle range from horizontal (degrees)
    pub const REFLECT_ANGLE_MIN_DEG: f32 = 15.0;
    pub const REFLECT_ANGLE_MAX_DEG: f32 = 165.0;

    /// Brick grid
    pub const BRICK_ROWS: u32 = 7;
    pub const BRICK_COLS: u32 = 12;
    pub const BRICK_W: f32 = 56.0;
    pub const BRICK_H: f32 = 24.0;
    pub const BRICK_GAP: f32 = 4.0;
    pub const TOP_MARGIN: f32 = 80.0;
    /// Chance that a cell is left empty on random levels
    pub const RANDOM_LEVEL_SKIP_CHANCE: f32 = 0.2;

    /// Session rules
    pub const LIVES_START: u32 = 3;
    pub const BRICK_REWARD: u64 = 10;
    pub const LEVEL_COUNT: u32 = 5;
    pub const NAME_MAX_LEN: usize = 12;
    pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";
}

/// Velocity vector for a heading (radians, y down) and speed
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos() * speed, angle.sin() * speed)
}

/// Heading of a velocity vector (radians)
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x)
}
