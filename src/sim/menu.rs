//! Level-select menu layout and hit testing

use glam::Vec2;
use serde::Serialize;

use super::rect::Rect;
use super::session::Progression;
use crate::consts::LEVEL_COUNT;

const BUTTON_START: Vec2 = Vec2::new(150.0, 200.0);
const BUTTON_SIZE: f32 = 100.0;
const BUTTON_PADDING: f32 = 20.0;
const BUTTONS_PER_ROW: u32 = 3;

/// One level-select button with its lock and hover state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelButton {
    pub level: u32,
    pub rect: Rect,
    pub locked: bool,
    pub hovered: bool,
}

/// Button rectangle for a level (1-based)
pub fn button_rect(level: u32) -> Rect {
    let i = level.saturating_sub(1);
    let pitch = BUTTON_SIZE + BUTTON_PADDING;
    Rect::new(
        BUTTON_START.x + (i % BUTTONS_PER_ROW) as f32 * pitch,
        BUTTON_START.y + (i / BUTTONS_PER_ROW) as f32 * pitch,
        BUTTON_SIZE,
        BUTTON_SIZE,
    )
}

/// Level whose button lies under `point`, locked or not
pub fn level_at(point: Vec2) -> Option<u32> {
    (1..=LEVEL_COUNT).find(|&level| button_rect(level).contains_point(point))
}

/// All buttons with lock and hover state
pub fn buttons(progression: &Progression, pointer: Option<Vec2>) -> Vec<LevelButton> {
    let hovered = pointer.and_then(level_at);
    (1..=LEVEL_COUNT)
        .map(|level| {
            let locked = !progression.is_unlocked(level);
            LevelButton {
                level,
                rect: button_rect(level),
                locked,
                hovered: !locked && hovered == Some(level),
            }
        })
        .collect()
}
