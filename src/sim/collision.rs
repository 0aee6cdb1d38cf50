//! Collision detection and response
//!
//! Ball vs paddle and ball vs bricks. Both are circle-vs-AABB approximations:
//! the paddle test probes the ball's lowest point, the brick test probes the
//! ball's center against the brick grown by the ball radius.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::consts::*;
use crate::{heading, velocity_from_angle};

/// Normalized impact offset from the paddle center, clamped to [-1, 1]
pub fn impact_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.x) / (paddle.w / 2.0)).clamp(-1.0, 1.0)
}

/// Departure angle (radians from horizontal) for an impact offset
///
/// Center sends the ball straight up; the edges send it out at 15 degrees
/// toward their own side.
pub fn reflection_angle(rel: f32) -> f32 {
    let rel = rel.clamp(-1.0, 1.0);
    let mid = (REFLECT_ANGLE_MIN_DEG + REFLECT_ANGLE_MAX_DEG) / 2.0;
    let half_span = (REFLECT_ANGLE_MAX_DEG - REFLECT_ANGLE_MIN_DEG) / 2.0;
    (mid - half_span * rel).to_radians()
}

/// Bounce a falling ball off the paddle
///
/// Returns `None` when there is no contact. Upward-moving balls never hit,
/// so a freshly launched ball cannot be caught on its way out.
pub fn reflect_off_paddle(ball: Ball, paddle: &Paddle) -> Option<Ball> {
    if ball.docked || ball.vel.y <= 0.0 {
        return None;
    }
    let rect = paddle.rect();
    let leading_edge = Vec2::new(ball.pos.x, ball.pos.y + ball.radius);
    if !rect.contains_point(leading_edge) {
        return None;
    }

    let angle = reflection_angle(impact_offset(ball.pos.x, paddle));
    let speed = (ball.speed() + BALL_SPEED_INC_ON_PADDLE).min(BALL_MAX_SPEED);
    let v = velocity_from_angle(angle, speed);

    Some(Ball {
        pos: Vec2::new(ball.pos.x, rect.top() - ball.radius),
        vel: Vec2::new(v.x, -v.y.abs()),
        ..ball
    })
}

/// Resolve the ball against every live brick
///
/// Each overlapping brick is resolved in turn against the already-updated
/// ball, destroyed, and counted. Returns the new ball and the number of
/// bricks destroyed.
pub fn collide_bricks(ball: Ball, bricks: &mut [Brick]) -> (Ball, u32) {
    let mut ball = ball;
    let mut hits = 0;

    for brick in bricks.iter_mut().filter(|b| b.is_alive()) {
        if !brick.rect.inflate(ball.radius).contains_point(ball.pos) {
            continue;
        }

        let rect = brick.rect;
        let dx_left = (ball.pos.x - rect.left()).abs();
        let dx_right = (rect.right() - ball.pos.x).abs();
        let dy_top = (ball.pos.y - rect.top()).abs();
        let dy_bottom = (rect.bottom() - ball.pos.y).abs();
        let min_x = dx_left.min(dx_right);
        let min_y = dy_top.min(dy_bottom);

        // Ties go to the vertical axis
        if min_x < min_y {
            if dx_left < dx_right {
                ball.pos.x = rect.left() - ball.radius;
                ball.vel.x = -ball.vel.x.abs();
            } else {
                ball.pos.x = rect.right() + ball.radius;
                ball.vel.x = ball.vel.x.abs();
            }
        } else if dy_top < dy_bottom {
            ball.pos.y = rect.top() - ball.radius;
            ball.vel.y = -ball.vel.y.abs();
        } else {
            ball.pos.y = rect.bottom() + ball.radius;
            ball.vel.y = ball.vel.y.abs();
        }

        brick.destroy();

        let speed = (ball.speed() + BALL_SPEED_INC_ON_HIT).min(BALL_MAX_SPEED);
        ball.vel = velocity_from_angle(heading(ball.vel), speed);
        hits += 1;
    }

    if hits > 0 {
        log::debug!("Ball destroyed {} brick(s) at {:?}", hits, ball.pos);
    }
    (ball, hits)
}
