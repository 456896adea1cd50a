//! Road Hopper - a grid lane-crossing arcade game, plus a small expense book
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor, obstacles, spawner, tick)
//! - `session`: Menu/pause/round state machine driven by keys
//! - `assets`: Sprite discovery and measurement
//! - `renderer`: Terminal rendering of a session
//! - `platform`: Terminal input mapping and frame pacing
//! - `persistence`: Atomic JSON file storage
//! - `expenses`: Validation, storage and export for the expense book

pub mod assets;
pub mod expenses;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, Assets, load_assets};
pub use session::{Key, PauseOption, Screen, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Side of one grid cell in pixels
    pub const GRID_SIZE: i32 = 50;
    /// Grid extent in cells
    pub const GRID_WIDTH: i32 = 16;
    pub const GRID_HEIGHT: i32 = 12;

    /// Playfield extent in pixels
    pub const SCREEN_WIDTH: i32 = GRID_SIZE * GRID_WIDTH;
    pub const SCREEN_HEIGHT: i32 = GRID_SIZE * GRID_HEIGHT;

    /// Actor bounding box side (one full cell)
    pub const ACTOR_SIZE: i32 = GRID_SIZE;

    /// Default display rate; the simulation advances once per frame
    pub const FRAME_RATE: u32 = 60;

    /// Spacing between candidate obstacle start offsets
    pub const SPAWN_SPACING: i32 = GRID_SIZE * 2;
}
