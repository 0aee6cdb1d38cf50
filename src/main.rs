//! Break Bricks headless driver
//!
//! Runs the engine without a window: an autopilot plays from level 1 for
//! the configured amount of game time, submits its score, and prints the
//! final frame as JSON. Rendering and audio hosts embed `Game` the same way.

use break_bricks::consts::*;
use break_bricks::sim::{Phase, TickInput};
use break_bricks::{Game, RenderSnapshot, ScoreBoard, Settings};

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Break Bricks (headless) starting...");

    let settings = Settings::load();
    let scores = match &settings.score_file {
        Some(path) => ScoreBoard::open(path).unwrap_or_else(|e| {
            log::warn!("Score file unavailable ({}), keeping scores in memory", e);
            ScoreBoard::new()
        }),
        None => ScoreBoard::new(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut game = Game::with_settings(&settings, seed, scores, Default::default());
    log::info!("Seed {}", game.state().seed);

    let dt = 1.0 / FPS;
    let max_ticks = (settings.demo_seconds.max(0.0) * FPS) as u64;
    let mut snapshot = game.snapshot(Vec::new());

    for _ in 0..max_ticks {
        let input = autopilot(&snapshot);
        snapshot = game.tick(dt, &input);
        if snapshot.quit_requested || snapshot.phase == Phase::GameOver {
            break;
        }
    }

    if snapshot.phase == Phase::Playing {
        log::info!("Demo time up at level {} with score {}", snapshot.level, snapshot.score);
    }

    for entry in game.scores().top() {
        println!("{:>12}  {:>6}", entry.username, entry.score);
    }
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
}

/// Simple AI: launch, then keep the paddle under the ball's landing spot
fn autopilot(snapshot: &RenderSnapshot) -> TickInput {
    match snapshot.phase {
        Phase::Menu => TickInput {
            select_level: Some(1),
            ..Default::default()
        },
        Phase::Playing => {
            let ball = &snapshot.ball;
            let paddle = &snapshot.paddle;
            let target = if ball.docked || ball.vel.y <= 0.0 {
                ball.pos.x
            } else {
                // Lead the ball slightly so hits land off-center
                let time_to_paddle = (paddle.y - ball.pos.y).max(0.0) / ball.vel.y;
                let lead = (ball.pos.x + ball.vel.x * time_to_paddle).clamp(0.0, LOGICAL_W);
                lead + if ball.vel.x > 0.0 { -12.0 } else { 12.0 }
            };
            let dead_zone = paddle.w * 0.1;
            TickInput {
                launch: ball.docked,
                move_left: target < paddle.x - dead_zone,
                move_right: target > paddle.x + dead_zone,
                ..Default::default()
            }
        }
        Phase::InputName => TickInput {
            typed: "AUTOPILOT".chars().collect(),
            submit: true,
            ..Default::default()
        },
        Phase::GameOver => TickInput {
            quit: true,
            ..Default::default()
        },
    }
}
