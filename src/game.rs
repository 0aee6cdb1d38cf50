//! Embeddable game facade
//!
//! The host owns the loop: it polls input, calls [`Game::tick`] (or
//! [`Game::frame`] with a timestamp) once per rendered frame, and draws the
//! returned snapshot. Score submission and audio cues are dispatched here,
//! after the simulation step, so neither can stall or fail a transition.

use serde::Serialize;

use crate::audio::{AudioManager, SoundEffect};
use crate::highscores::ScoreSink;
use crate::platform::{FpsCounter, SimClock};
use crate::settings::Settings;
use crate::sim::{
    Ball, Brick, GameEvent, GameState, LevelButton, Paddle, Phase, Session, TickInput, menu, tick,
};

/// Background tint for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Backdrop {
    Menu,
    /// Levels 1-2
    World1,
    /// Levels 3-4
    World2,
    /// Level 5 and beyond
    World3,
}

impl Backdrop {
    pub fn for_session(session: &Session) -> Self {
        match (session.phase, session.level) {
            (Phase::Menu, _) => Backdrop::Menu,
            (_, 0..=2) => Backdrop::World1,
            (_, 3..=4) => Backdrop::World2,
            _ => Backdrop::World3,
        }
    }
}

/// Read-only view of one frame for render/audio collaborators
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: Phase,
    pub paused: bool,
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub unlocked_level: u32,
    /// "GAME OVER" / "VICTORY!" once a run has ended
    pub message: Option<String>,
    pub player_name: String,
    pub hud: String,
    pub fps: Option<String>,
    pub backdrop: Backdrop,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Live bricks only
    pub bricks: Vec<Brick>,
    pub menu: Vec<LevelButton>,
    pub events: Vec<GameEvent>,
    /// Audio cue names for this tick
    pub cues: Vec<&'static str>,
    pub quit_requested: bool,
}

/// Game instance holding all state
pub struct Game<S: ScoreSink> {
    state: GameState,
    scores: S,
    audio: AudioManager,
    clock: SimClock,
    fps: FpsCounter,
    show_fps: bool,
}

impl<S: ScoreSink> Game<S> {
    /// Silent game at the menu
    pub fn new(seed: u64, scores: S) -> Self {
        Self {
            state: GameState::new(seed),
            scores,
            audio: AudioManager::disabled(),
            clock: SimClock::new(),
            fps: FpsCounter::default(),
            show_fps: false,
        }
    }

    /// Game configured from settings; `seed` is used when settings fix none
    pub fn with_settings(
        settings: &Settings,
        seed: u64,
        scores: S,
        mut audio: AudioManager,
    ) -> Self {
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        Self {
            state: GameState::new(settings.seed.unwrap_or(seed)),
            scores,
            audio,
            clock: SimClock::new(),
            fps: FpsCounter::default(),
            show_fps: settings.show_fps,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for hosts and tests that stage scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scores(&self) -> &S {
        &self.scores
    }

    /// Advance one tick with an explicit delta time
    pub fn tick(&mut self, dt: f32, input: &TickInput) -> RenderSnapshot {
        let events = tick(&mut self.state, input, dt);

        for event in &events {
            if let GameEvent::ScoreSubmitted { name, score } = event {
                match self.scores.submit(name, *score) {
                    Ok(()) => log::info!("Submitted score {} for {}", score, name),
                    Err(e) => log::warn!("Score submission failed: {}", e),
                }
            }
        }
        self.audio.play_events(&events);

        self.snapshot(events)
    }

    /// Advance one tick using a host timestamp (seconds)
    pub fn frame(&mut self, now_secs: f64, input: &TickInput) -> RenderSnapshot {
        let dt = self.clock.advance(now_secs);
        self.fps.record(now_secs);
        self.tick(dt, input)
    }

    /// Build a snapshot of the current state
    pub fn snapshot(&self, events: Vec<GameEvent>) -> RenderSnapshot {
        let state = &self.state;
        let session = &state.session;
        let menu = if session.phase == Phase::Menu {
            menu::buttons(&state.progression, state.pointer)
        } else {
            Vec::new()
        };
        let cues = events
            .iter()
            .filter_map(SoundEffect::for_event)
            .map(|cue| cue.name())
            .collect();

        RenderSnapshot {
            phase: session.phase,
            paused: session.paused,
            level: session.level,
            score: session.score,
            lives: session.lives,
            unlocked_level: state.progression.unlocked_level(),
            message: session.message().map(str::to_string),
            player_name: session.player_name.clone(),
            hud: session.hud_text(),
            fps: self.show_fps.then(|| self.fps.label()),
            backdrop: Backdrop::for_session(session),
            paddle: state.paddle,
            ball: state.ball,
            bricks: state
                .field
                .bricks()
                .iter()
                .filter(|b| b.is_alive())
                .cloned()
                .collect(),
            menu,
            events,
            cues,
            quit_requested: state.quit_requested,
        }
    }
}
