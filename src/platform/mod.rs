//! Platform abstraction layer
//!
//! Keeps terminal specifics out of the session and simulation:
//! - Input events (crossterm keys to session keys)
//! - Frame pacing

pub mod clock;
pub mod input;

pub use clock::FrameClock;
pub use input::{map_key, should_quit};
