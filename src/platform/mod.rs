//! Platform abstraction layer
//!
//! Host-side shims that sit between a window/event loop and the engine:
//! - Frame timing (wall clock to bounded delta time, FPS counter)
//! - Window to logical coordinate mapping (letterboxed scaling)

pub mod time;
pub mod viewport;

pub use time::{FpsCounter, SimClock};
pub use viewport::Viewport;
