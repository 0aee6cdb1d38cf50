//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, driven by the host
//! - Seeded RNG only (launch angles, random levels)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod menu;
pub mod rect;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{collide_bricks, impact_offset, reflect_off_paddle, reflection_angle};
pub use level::BrickField;
pub use menu::LevelButton;
pub use rect::Rect;
pub use session::{Outcome, Phase, Progression, Session, SessionEvent, step};
pub use state::{Ball, Brick, BrickColor, GameEvent, GameState, PALETTE, Paddle};
pub use tick::{TickInput, tick};
