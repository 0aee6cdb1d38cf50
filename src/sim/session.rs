//! Session progression: score, lives, level and the coarse game phase
//!
//! Transitions are pure: `step` takes the prior session and progression plus
//! one event and returns the next pair. Entity rebuilds (bricks, ball) are
//! left to the caller, which compares before and after.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Coarse session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Level select
    #[default]
    Menu,
    /// Active gameplay (may be paused)
    Playing,
    /// Run ended, collecting the player's name
    InputName,
    /// Score submitted, waiting for return to menu
    GameOver,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Out of lives
    Defeat,
    /// Final level cleared
    Victory,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Defeat => "GAME OVER",
            Outcome::Victory => "VICTORY!",
        }
    }
}

/// Unlock high-water mark; only ever rises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    unlocked_level: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self { unlocked_level: 1 }
    }
}

impl Progression {
    pub fn unlocked_level(&self) -> u32 {
        self.unlocked_level
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        (1..=self.unlocked_level).contains(&level)
    }

    /// Raise the mark to `level` if higher; never lowers it
    pub fn raise(self, level: u32) -> Self {
        Self {
            unlocked_level: self.unlocked_level.max(level.min(LEVEL_COUNT)),
        }
    }
}

/// Per-run state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    /// Orthogonal to `Phase::Playing`
    pub paused: bool,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    pub outcome: Option<Outcome>,
    pub player_name: String,
    /// Score submission already fired for this run
    pub score_submitted: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Menu,
            paused: false,
            level: 1,
            score: 0,
            lives: LIVES_START,
            outcome: None,
            player_name: String::new(),
            score_submitted: false,
        }
    }
}

impl Session {
    /// Fresh run at `level`
    pub fn start(level: u32) -> Self {
        Self {
            phase: Phase::Playing,
            level,
            ..Self::default()
        }
    }

    /// Final overlay text ("GAME OVER" / "VICTORY!")
    pub fn message(&self) -> Option<&'static str> {
        self.outcome.map(|o| o.message())
    }

    /// Playing and not paused: the simulation should advance
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Playing && !self.paused
    }

    pub fn hud_text(&self) -> String {
        format!(
            "Score: {:06}   Lives: {}   Level: {}",
            self.score, self.lives, self.level
        )
    }

    fn end_run(self, outcome: Outcome) -> Self {
        Self {
            phase: Phase::InputName,
            paused: false,
            outcome: Some(outcome),
            player_name: String::new(),
            score_submitted: false,
            ..self
        }
    }
}

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Menu selection of a level
    Start { level: u32 },
    TogglePause,
    BricksDestroyed(u32),
    /// Free ball fell past the bottom edge
    BallLost,
    /// Every brick in the field is dead
    LevelCleared,
    AppendChar(char),
    Backspace,
    SubmitName,
    ReturnToMenu,
}

/// Advance the session by one event
///
/// Events that make no sense in the current phase leave both values
/// untouched.
pub fn step(
    session: Session,
    progression: Progression,
    event: SessionEvent,
) -> (Session, Progression) {
    use SessionEvent::*;

    match (session.phase, event) {
        (Phase::Menu, Start { level })
            if progression.is_unlocked(level) && level <= LEVEL_COUNT =>
        {
            (Session::start(level), progression)
        }

        (Phase::Playing, TogglePause) => (
            Session {
                paused: !session.paused,
                ..session
            },
            progression,
        ),

        (Phase::Playing, ReturnToMenu) | (Phase::GameOver, ReturnToMenu) => (
            Session {
                phase: Phase::Menu,
                paused: false,
                ..session
            },
            progression,
        ),

        (Phase::Playing, BricksDestroyed(hits)) if !session.paused => (
            Session {
                score: session.score + u64::from(hits) * BRICK_REWARD,
                ..session
            },
            progression,
        ),

        (Phase::Playing, BallLost) if !session.paused => {
            let lives = session.lives.saturating_sub(1);
            let next = Session { lives, ..session };
            if lives == 0 {
                (next.end_run(Outcome::Defeat), progression)
            } else {
                (next, progression)
            }
        }

        (Phase::Playing, LevelCleared) if !session.paused => {
            let next_level = session.level + 1;
            let progression = progression.raise(next_level);
            if next_level <= LEVEL_COUNT {
                (
                    Session {
                        level: next_level,
                        lives: session.lives + 1,
                        ..session
                    },
                    progression,
                )
            } else {
                (session.end_run(Outcome::Victory), progression)
            }
        }

        (Phase::InputName, AppendChar(c)) => {
            let mut next = session;
            if is_printable(c) && next.player_name.chars().count() < NAME_MAX_LEN {
                next.player_name.push(c);
            }
            (next, progression)
        }

        (Phase::InputName, Backspace) => {
            let mut next = session;
            next.player_name.pop();
            (next, progression)
        }

        (Phase::InputName, SubmitName) => {
            let mut next = session;
            if next.player_name.is_empty() {
                next.player_name = DEFAULT_PLAYER_NAME.to_string();
            }
            next.score_submitted = true;
            next.phase = Phase::GameOver;
            (next, progression)
        }

        (_, _) => (session, progression),
    }
}

/// Visible characters plus the plain space
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    let format = matches!(
        c,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    );
    let private_use = matches!(
        c,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    );
    !(c.is_control() || c.is_whitespace() || format || private_use)
}
