//! Per-frame simulation tick
//!
//! One call per rendered frame. Input is applied first, then the physics
//! step (paddle, ball, paddle bounce, bricks), then the session checks for
//! ball loss and level clear.

use glam::Vec2;
use rand::Rng;

use super::collision::{collide_bricks, reflect_off_paddle};
use super::level::BrickField;
use super::menu;
use super::session::{self, Outcome, Phase, SessionEvent};
use super::state::{GameEvent, GameState, Paddle};
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Launch a docked ball
    pub launch: bool,
    /// Pause toggle
    pub pause: bool,
    /// Back to the level-select menu
    pub menu: bool,
    /// Direct level selection (keyboard shortcut)
    pub select_level: Option<u32>,
    /// Pointer click, in logical units
    pub click: Option<Vec2>,
    /// Pointer position, in logical units
    pub pointer: Option<Vec2>,
    /// Characters typed this tick (name entry)
    pub typed: Vec<char>,
    pub backspace: bool,
    pub submit: bool,
    pub quit: bool,
    /// Debug: leave a single brick above the paddle
    pub debug_single_brick: bool,
}

/// Advance the game by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pointer.is_some() {
        state.pointer = input.pointer;
    }
    if input.quit {
        log::info!("Quit requested");
        state.quit_requested = true;
        return events;
    }

    match state.session.phase {
        Phase::Menu => {
            let choice = input
                .select_level
                .or_else(|| input.click.and_then(menu::level_at));
            if let Some(level) = choice {
                apply(state, SessionEvent::Start { level }, &mut events);
            }
        }

        Phase::Playing => {
            if input.menu {
                apply(state, SessionEvent::ReturnToMenu, &mut events);
                return events;
            }
            if input.pause {
                apply(state, SessionEvent::TogglePause, &mut events);
            }
            if !state.session.is_running() {
                return events;
            }

            if input.debug_single_brick {
                let (x, bottom) = (state.paddle.x, state.paddle.y - 100.0);
                state.field.keep_single_brick(x, bottom);
                log::info!("Debug: single brick left");
            }
            if input.launch && state.ball.docked {
                let angle = state
                    .rng
                    .random_range(LAUNCH_ANGLE_MIN_DEG..=LAUNCH_ANGLE_MAX_DEG)
                    .to_radians();
                state.ball = state.ball.launch(angle, BALL_SPEED);
            }

            step_physics(state, input, dt, &mut events);
        }

        Phase::InputName => {
            for &c in &input.typed {
                apply(state, SessionEvent::AppendChar(c), &mut events);
            }
            if input.backspace {
                apply(state, SessionEvent::Backspace, &mut events);
            }
            if input.submit {
                apply(state, SessionEvent::SubmitName, &mut events);
            }
        }

        Phase::GameOver => {
            if input.menu {
                apply(state, SessionEvent::ReturnToMenu, &mut events);
            }
        }
    }

    events
}

fn step_physics(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    state.paddle = state.paddle.update(dt, input.move_left, input.move_right);

    if state.ball.docked {
        state.ball = state.ball.follow(&state.paddle);
    } else {
        state.ball = state.ball.update(dt);

        if let Some(ball) = reflect_off_paddle(state.ball, &state.paddle) {
            state.ball = ball;
            events.push(GameEvent::PaddleHit);
        }

        let (ball, hits) = collide_bricks(state.ball, state.field.bricks_mut());
        state.ball = ball;
        if hits > 0 {
            events.push(GameEvent::BricksDestroyed { count: hits });
            apply(state, SessionEvent::BricksDestroyed(hits), events);
        }
    }

    if state.ball.is_lost() {
        apply(state, SessionEvent::BallLost, events);
    }

    if state.session.phase == Phase::Playing && state.field.is_cleared() {
        apply(state, SessionEvent::LevelCleared, events);
    }
}

/// Run a session transition and rebuild entities to match the outcome
fn apply(state: &mut GameState, event: SessionEvent, events: &mut Vec<GameEvent>) {
    let prev_phase = state.session.phase;
    let prev_level = state.session.level;
    let prev_lives = state.session.lives;
    let prev_submitted = state.session.score_submitted;

    let session = std::mem::take(&mut state.session);
    let (session, progression) = session::step(session, state.progression, event);
    state.session = session;
    state.progression = progression;

    let phase = state.session.phase;
    let level = state.session.level;

    match (prev_phase, phase) {
        (Phase::Menu, Phase::Playing) => {
            state.paddle = Paddle::default();
            state.field = BrickField::generate(level, &mut state.rng);
            state.respawn_ball();
            log::info!("Level {} started ({} bricks)", level, state.field.len());
            events.push(GameEvent::LevelStarted { level });
        }

        (Phase::Playing, Phase::Playing) if level != prev_level => {
            events.push(GameEvent::LevelWon { level: prev_level });
            state.field = BrickField::generate(level, &mut state.rng);
            state.respawn_ball();
            log::info!(
                "Level {} cleared, advancing to {} (lives {}, unlocked {})",
                prev_level,
                level,
                state.session.lives,
                state.progression.unlocked_level()
            );
            events.push(GameEvent::LevelStarted { level });
        }

        (Phase::Playing, Phase::Playing) if state.session.lives < prev_lives => {
            log::debug!("Ball lost, {} lives left", state.session.lives);
            state.respawn_ball();
            events.push(GameEvent::LifeLost {
                lives_left: state.session.lives,
            });
        }

        (Phase::Playing, Phase::InputName) => {
            state.ball = state.ball.freeze();
            match state.session.outcome {
                Some(Outcome::Victory) => {
                    log::info!("Victory! Final score {}", state.session.score);
                    events.push(GameEvent::LevelWon { level: prev_level });
                    events.push(GameEvent::Victory);
                }
                _ => {
                    log::info!("Game over on level {}, score {}", prev_level, state.session.score);
                    events.push(GameEvent::LifeLost { lives_left: 0 });
                    events.push(GameEvent::GameOver);
                }
            }
        }

        (Phase::Playing, Phase::Menu) | (Phase::GameOver, Phase::Menu) => {
            log::info!("Returned to menu");
        }

        _ => {}
    }

    if !prev_submitted && state.session.score_submitted {
        events.push(GameEvent::ScoreSubmitted {
            name: state.session.player_name.clone(),
            score: state.session.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Ball;

    const DT: f32 = 1.0 / FPS;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        let events = tick(
            &mut state,
            &TickInput {
                select_level: Some(1),
                ..Default::default()
            },
            DT,
        );
        assert_eq!(events, vec![GameEvent::LevelStarted { level: 1 }]);
        state
    }

    #[test]
    fn test_menu_to_playing() {
        let state = playing_state();
        assert_eq!(state.session.phase, Phase::Playing);
        assert_eq!(state.field.len(), 84);
        assert!(state.ball.docked);
    }

    #[test]
    fn test_locked_level_click_ignored() {
        let mut state = GameState::new(1);
        let input = TickInput {
            click: Some(menu::button_rect(2).center()),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.session.phase, Phase::Menu);

        let input = TickInput {
            click: Some(menu::button_rect(1).center()),
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.session.phase, Phase::Playing);
    }

    #[test]
    fn test_launch_and_fly() {
        let mut state = playing_state();
        let input = TickInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.ball.docked);
        assert!(state.ball.vel.y < 0.0);
        let angle = (-state.ball.vel.y).atan2(state.ball.vel.x).to_degrees();
        assert!((LAUNCH_ANGLE_MIN_DEG - 0.01..=LAUNCH_ANGLE_MAX_DEG + 0.01).contains(&angle));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut state = playing_state();
        tick(
            &mut state,
            &TickInput {
                launch: true,
                ..Default::default()
            },
            DT,
        );
        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.session.paused);

        let ball = state.ball;
        let ticks = state.time_ticks;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.ball, ball);
        assert_eq!(state.time_ticks, ticks);

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..Default::default()
            },
            DT,
        );
        assert!(!state.session.paused);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_ball_loss_respawns() {
        let mut state = playing_state();
        state.ball = Ball {
            pos: Vec2::new(400.0, LOGICAL_H + 20.0),
            vel: Vec2::new(0.0, 300.0),
            radius: BALL_RADIUS,
            docked: false,
        };
        let events = tick(&mut state, &TickInput::default(), DT);
        let lives_left = LIVES_START - 1;
        assert!(events.contains(&GameEvent::LifeLost { lives_left }));
        assert_eq!(state.session.lives, LIVES_START - 1);
        assert!(state.ball.docked);
        assert_eq!(state.field.live_count(), 84);
    }

    #[test]
    fn test_menu_abort() {
        let mut state = playing_state();
        tick(
            &mut state,
            &TickInput {
                menu: true,
                ..Default::default()
            },
            DT,
        );
        assert_eq!(state.session.phase, Phase::Menu);
    }

    #[test]
    fn test_quit_flag() {
        let mut state = GameState::new(1);
        tick(
            &mut state,
            &TickInput {
                quit: true,
                ..Default::default()
            },
            DT,
        );
        assert!(state.quit_requested);
    }
}
