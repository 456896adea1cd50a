//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Randomness only through an injected RNG
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_overlap};
pub use spawn::{LANES, Lane, spawn_round, spawn_slots};
pub use state::{
    Actor, Difficulty, Facing, Heading, Obstacle, ObstacleSprites, Outcome, Round, SpriteSize,
};
pub use tick::{RoundEvent, tick};
