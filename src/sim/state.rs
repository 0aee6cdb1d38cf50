//! Game state and core simulation types
//!
//! Entity records are small `Copy` values; update functions take them by
//! value and return the next state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::BrickField;
use super::rect::Rect;
use super::session::{Progression, Session};
use crate::consts::*;
use crate::velocity_from_angle;

/// The player's paddle (moves horizontally only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Horizontal center
    pub x: f32,
    /// Vertical center (fixed)
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Horizontal velocity
    pub vx: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: LOGICAL_W / 2.0,
            y: PADDLE_Y,
            w: PADDLE_W,
            h: PADDLE_H,
            vx: 0.0,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::from_center(Vec2::new(self.x, self.y), self.w, self.h)
    }

    /// Integrate one tick of directional input
    ///
    /// Both flags false applies no acceleration; friction alone decays the
    /// velocity. The paddle never leaves the field, and touching a wall
    /// kills its velocity.
    pub fn update(self, dt: f32, move_left: bool, move_right: bool) -> Self {
        let mut next = self;

        let mut ax = 0.0;
        if move_left {
            ax -= PADDLE_ACCEL;
        }
        if move_right {
            ax += PADDLE_ACCEL;
        }
        next.vx += ax * dt;
        next.vx *= 1.0 - PADDLE_FRICTION * (dt * FPS).max(0.0);
        next.vx = next.vx.clamp(-PADDLE_MAX_SPEED, PADDLE_MAX_SPEED);
        next.x += next.vx * dt;

        let half = next.w / 2.0;
        if next.x - half < 0.0 {
            next.x = half;
            next.vx = 0.0;
        }
        if next.x + half > LOGICAL_W {
            next.x = LOGICAL_W - half;
            next.vx = 0.0;
        }
        next
    }
}

/// A ball, either docked on the paddle or moving freely
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Glued to the paddle, waiting for launch
    pub docked: bool,
}

impl Ball {
    /// Fresh docked ball resting on the paddle
    pub fn docked_on(paddle: &Paddle) -> Self {
        Self {
            pos: Self::rest_position(paddle),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            docked: true,
        }
    }

    /// Where a docked ball sits: centered, just above the paddle top
    pub fn rest_position(paddle: &Paddle) -> Vec2 {
        Vec2::new(paddle.x, paddle.y - PADDLE_H / 2.0 - BALL_RADIUS - 1.0)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Keep a docked ball slaved to the paddle
    pub fn follow(self, paddle: &Paddle) -> Self {
        if !self.docked {
            return self;
        }
        Self {
            pos: Self::rest_position(paddle),
            vel: Vec2::ZERO,
            ..self
        }
    }

    /// Freeze in place: docked, zero velocity
    pub fn freeze(self) -> Self {
        Self {
            vel: Vec2::ZERO,
            docked: true,
            ..self
        }
    }

    /// Launch a docked ball at `angle` (radians from horizontal, upward)
    pub fn launch(self, angle: f32, speed: f32) -> Self {
        if !self.docked {
            return self;
        }
        let v = velocity_from_angle(angle, speed);
        Self {
            vel: Vec2::new(v.x, -v.y.abs()),
            docked: false,
            ..self
        }
    }

    /// Integrate position and reflect off the side and top walls
    ///
    /// The bottom edge is open; falling out is handled by the session.
    pub fn update(self, dt: f32) -> Self {
        if self.docked {
            return self;
        }
        let mut next = self;
        next.pos += next.vel * dt;

        let r = next.radius;
        if next.pos.x - r < 0.0 {
            next.pos.x = r;
            next.vel.x = next.vel.x.abs();
        }
        if next.pos.x + r > LOGICAL_W {
            next.pos.x = LOGICAL_W - r;
            next.vel.x = -next.vel.x.abs();
        }
        if next.pos.y - r < 0.0 {
            next.pos.y = r;
            next.vel.y = next.vel.y.abs();
        }
        next
    }

    /// Entirely below the bottom edge of the field
    pub fn is_lost(&self) -> bool {
        !self.docked && self.pos.y - self.radius > LOGICAL_H
    }
}

/// Cosmetic brick tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickColor {
    Magenta,
    Orange,
    Yellow,
    Green,
    Cyan,
    White,
    Red,
}

/// Row/column palette used by the level patterns
pub const PALETTE: [BrickColor; 7] = [
    BrickColor::Magenta,
    BrickColor::Orange,
    BrickColor::Yellow,
    BrickColor::Green,
    BrickColor::Cyan,
    BrickColor::White,
    BrickColor::Red,
];

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: BrickColor,
    alive: bool,
}

impl Brick {
    pub fn new(rect: Rect, color: BrickColor) -> Self {
        Self {
            rect,
            color,
            alive: true,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark destroyed. There is no way back.
    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

/// Something the render/audio collaborators may react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32 },
    PaddleHit,
    BricksDestroyed { count: u32 },
    LifeLost { lives_left: u32 },
    LevelWon { level: u32 },
    Victory,
    GameOver,
    ScoreSubmitted { name: String, score: u64 },
}

/// Complete engine state, exclusively owned by the tick loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// RNG seed for this process run
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub session: Session,
    /// Outlives sessions: survives restarts and menu returns
    pub progression: Progression,
    pub paddle: Paddle,
    pub ball: Ball,
    pub field: BrickField,
    /// Simulation tick counter (playing, unpaused ticks only)
    pub time_ticks: u64,
    /// Last pointer position in logical units (menu hover)
    pub pointer: Option<Vec2>,
    /// Host should tear down
    pub quit_requested: bool,
}

impl GameState {
    /// New engine sitting at the level-select menu
    pub fn new(seed: u64) -> Self {
        let paddle = Paddle::default();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            session: Session::default(),
            progression: Progression::default(),
            paddle,
            ball: Ball::docked_on(&paddle),
            field: BrickField::empty(),
            time_ticks: 0,
            pointer: None,
            quit_requested: false,
        }
    }

    /// Replace the ball with a fresh docked one on the paddle
    pub fn respawn_ball(&mut self) {
        self.ball = Ball::docked_on(&self.paddle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_accelerates_and_clamps_speed() {
        let mut paddle = Paddle::default();
        for _ in 0..600 {
            paddle = paddle.update(1.0 / FPS, false, true);
            assert!(paddle.vx.abs() <= PADDLE_MAX_SPEED);
        }
        // Pinned against the right wall
        assert!((paddle.x + paddle.w / 2.0 - LOGICAL_W).abs() < 0.001);
        assert_eq!(paddle.vx, 0.0);
    }

    #[test]
    fn test_paddle_opposing_inputs_cancel() {
        let paddle = Paddle::default().update(1.0 / FPS, true, true);
        assert_eq!(paddle.vx, 0.0);
        assert_eq!(paddle.x, LOGICAL_W / 2.0);
    }

    #[test]
    fn test_paddle_coasts_without_input() {
        let moving = Paddle {
            vx: 300.0,
            ..Paddle::default()
        };
        let next = moving.update(1.0 / FPS, false, false);
        assert!(next.vx > 0.0 && next.vx < 300.0);
        assert!(next.x > moving.x);
    }

    #[test]
    fn test_paddle_left_wall_clamp() {
        let paddle = Paddle {
            x: 60.0,
            vx: -PADDLE_MAX_SPEED,
            ..Paddle::default()
        };
        let next = paddle.update(0.1, true, false);
        assert_eq!(next.x, PADDLE_W / 2.0);
        assert_eq!(next.vx, 0.0);
    }

    #[test]
    fn test_docked_ball_follows_paddle() {
        let paddle = Paddle {
            x: 200.0,
            ..Paddle::default()
        };
        let ball = Ball::docked_on(&Paddle::default()).follow(&paddle);
        assert_eq!(ball.pos.x, 200.0);
        assert_eq!(ball.vel, Vec2::ZERO);
        // Docked balls do not integrate
        assert_eq!(ball.update(1.0), ball);
    }

    #[test]
    fn test_launch_points_upward() {
        let ball = Ball::docked_on(&Paddle::default()).launch(45f32.to_radians(), BALL_SPEED);
        assert!(!ball.docked);
        assert!(ball.vel.y < 0.0);
        assert!((ball.speed() - BALL_SPEED).abs() < 0.01);
    }

    #[test]
    fn test_ball_wall_reflections() {
        let ball = Ball {
            pos: Vec2::new(5.0, 300.0),
            vel: Vec2::new(-100.0, 50.0),
            radius: BALL_RADIUS,
            docked: false,
        };
        let next = ball.update(0.01);
        assert_eq!(next.pos.x, BALL_RADIUS);
        assert!(next.vel.x > 0.0);

        let ball = Ball {
            pos: Vec2::new(LOGICAL_W - 5.0, 300.0),
            vel: Vec2::new(100.0, 50.0),
            ..ball
        };
        let next = ball.update(0.01);
        assert_eq!(next.pos.x, LOGICAL_W - BALL_RADIUS);
        assert!(next.vel.x < 0.0);

        let ball = Ball {
            pos: Vec2::new(400.0, 5.0),
            vel: Vec2::new(0.0, -100.0),
            ..ball
        };
        let next = ball.update(0.01);
        assert_eq!(next.pos.y, BALL_RADIUS);
        assert!(next.vel.y > 0.0);
    }

    #[test]
    fn test_ball_passes_bottom_edge() {
        let ball = Ball {
            pos: Vec2::new(400.0, LOGICAL_H + 2.0),
            vel: Vec2::new(0.0, 300.0),
            radius: BALL_RADIUS,
            docked: false,
        };
        let next = ball.update(0.1);
        assert!(next.vel.y > 0.0);
        assert!(next.is_lost());
    }

    #[test]
    fn test_brick_destroy_is_final() {
        let mut brick = Brick::new(Rect::new(0.0, 0.0, 10.0, 10.0), BrickColor::Red);
        assert!(brick.is_alive());
        brick.destroy();
        brick.destroy();
        assert!(!brick.is_alive());
    }
}
