//! Round state and core simulation types
//!
//! Everything the tick needs to advance a round lives here.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Difficulty tier chosen in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu order
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to every lane's base speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 0.6,
            Difficulty::Hard => 0.75,
        }
    }

    /// Obstacles spawned in each lane
    pub fn obstacles_per_lane(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    /// Next tier in menu order, wrapping
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Previous tier in menu order, wrapping
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

/// Direction the actor faces (and moves)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    /// Unit step in grid cells (y grows downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Facing::Up => IVec2::new(0, -1),
            Facing::Down => IVec2::new(0, 1),
            Facing::Left => IVec2::new(-1, 0),
            Facing::Right => IVec2::new(1, 0),
        }
    }
}

/// Horizontal travel direction of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Right,
    Left,
}

impl Heading {
    pub fn sign(&self) -> f32 {
        match self {
            Heading::Right => 1.0,
            Heading::Left => -1.0,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner in pixels, always a multiple of `GRID_SIZE`
    pub pos: IVec2,
    pub facing: Facing,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            pos: IVec2::new(GRID_WIDTH / 2 * GRID_SIZE, (GRID_HEIGHT - 1) * GRID_SIZE),
            facing: Facing::Up,
        }
    }
}

impl Actor {
    /// Move one grid cell toward `facing`.
    ///
    /// Returns false and leaves the actor untouched when the target cell is
    /// off the playfield.
    pub fn step(&mut self, facing: Facing) -> bool {
        let target = self.pos + facing.delta() * GRID_SIZE;
        let inside = (0..SCREEN_WIDTH).contains(&target.x) && (0..SCREEN_HEIGHT).contains(&target.y);
        if !inside {
            return false;
        }
        self.pos = target;
        self.facing = facing;
        true
    }

    /// Grid row the actor occupies (0 is the goal row)
    pub fn row(&self) -> i32 {
        self.pos.y / GRID_SIZE
    }

    pub fn column(&self) -> i32 {
        self.pos.x / GRID_SIZE
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.as_vec2(), Vec2::splat(ACTOR_SIZE as f32))
    }
}

/// Pixel size of a sprite as drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: u32,
    pub height: u32,
}

impl SpriteSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size after a quarter turn
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Scale to fit inside one grid cell, preserving aspect ratio.
    ///
    /// Each side keeps at least one pixel so thin sprites stay visible.
    pub fn fit_to_cell(&self) -> Self {
        if self.width == 0 || self.height == 0 {
            return *self;
        }
        let cell = GRID_SIZE as f32;
        let scale = (cell / self.width as f32).min(cell / self.height as f32);
        Self {
            width: ((self.width as f32 * scale) as u32).max(1),
            height: ((self.height as f32 * scale) as u32).max(1),
        }
    }
}

/// Obstacle sprite sizes; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleSprites(Vec<SpriteSize>);

impl ObstacleSprites {
    /// Returns None for an empty list
    pub fn new(sizes: Vec<SpriteSize>) -> Option<Self> {
        if sizes.is_empty() {
            None
        } else {
            Some(Self(sizes))
        }
    }

    pub fn as_slice(&self) -> &[SpriteSize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A lane obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner in pixels (x is continuous)
    pub pos: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub heading: Heading,
    /// Lane row the obstacle travels in
    pub row: i32,
    /// Bounding box size (sprite as drawn, rotated to the lane)
    pub size: Vec2,
    /// Which obstacle sprite to draw
    pub sprite: usize,
}

impl Obstacle {
    /// Create an obstacle at `x` in lane `row`, centred vertically in the lane
    pub fn new(x: f32, row: i32, speed: f32, heading: Heading, sprite: usize, size: SpriteSize) -> Self {
        let y = row * GRID_SIZE + (GRID_SIZE - size.height as i32) / 2;
        Self {
            pos: Vec2::new(x, y as f32),
            speed,
            heading,
            row,
            size: Vec2::new(size.width as f32, size.height as f32),
            sprite,
        }
    }

    /// Move one tick along the lane, wrapping to the opposite edge
    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.heading.sign();
        match self.heading {
            Heading::Right if self.pos.x > SCREEN_WIDTH as f32 => {
                self.pos.x = -self.size.x;
            }
            Heading::Left if self.pos.x < -self.size.x => {
                self.pos.x = SCREEN_WIDTH as f32;
            }
            _ => {}
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Result of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Outcome {
    #[default]
    Active,
    /// Actor was hit
    Lost,
    /// Actor reached the goal row
    Won,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Active)
    }
}

/// One round from spawn to win/loss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub difficulty: Difficulty,
    pub actor: Actor,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub outcome: Outcome,
    /// Active ticks elapsed
    pub time_ticks: u64,
}

impl Round {
    /// Empty round with the actor at its start cell
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            actor: Actor::default(),
            obstacles: Vec::new(),
            outcome: Outcome::Active,
            time_ticks: 0,
        }
    }

    /// Move the actor while the round is active
    pub fn move_actor(&mut self, facing: Facing) -> bool {
        if self.outcome.is_over() {
            return false;
        }
        self.actor.step(facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_actor_starts_bottom_center() {
        let actor = Actor::default();
        assert_eq!(actor.pos, IVec2::new(400, 550));
        assert_eq!(actor.row(), GRID_HEIGHT - 1);
        assert_eq!(actor.facing, Facing::Up);
    }

    #[test]
    fn test_actor_rejects_off_grid_moves() {
        let mut actor = Actor::default();
        // Bottom row: moving down leaves the grid
        assert!(!actor.step(Facing::Down));
        assert_eq!(actor.pos, IVec2::new(400, 550));
        assert_eq!(actor.facing, Facing::Up);

        actor.pos = IVec2::new(0, 0);
        actor.facing = Facing::Right;
        assert!(!actor.step(Facing::Left));
        assert!(!actor.step(Facing::Up));
        assert_eq!(actor.pos, IVec2::ZERO);
        assert_eq!(actor.facing, Facing::Right);

        actor.pos = IVec2::new(SCREEN_WIDTH - GRID_SIZE, 0);
        assert!(!actor.step(Facing::Right));
        assert_eq!(actor.pos.x, 750);
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.prev(), Difficulty::Hard);
        for d in Difficulty::ALL {
            assert_eq!(d.next().prev(), d);
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_obstacle_wraps_right_edge() {
        let mut car = Obstacle::new(798.0, 3, 5.0, Heading::Right, 0, SpriteSize::new(40, 30));
        car.advance();
        assert_eq!(car.pos.x, -40.0);
        // Right edge sits on the left boundary
        assert_eq!(car.rect().max().x, 0.0);
        assert_eq!(car.row, 3);
        assert_eq!(car.pos.y, (3 * GRID_SIZE + 10) as f32);
    }

    #[test]
    fn test_obstacle_wraps_left_edge() {
        let mut car = Obstacle::new(-38.0, 4, 6.0, Heading::Left, 0, SpriteSize::new(40, 30));
        car.advance();
        assert_eq!(car.pos.x, SCREEN_WIDTH as f32);
        assert_eq!(car.row, 4);
    }

    #[test]
    fn test_sprite_fit_to_cell() {
        let size = SpriteSize::new(200, 100).fit_to_cell();
        assert_eq!(size, SpriteSize::new(50, 25));
        assert_eq!(size.rotated(), SpriteSize::new(25, 50));
        assert!(ObstacleSprites::new(Vec::new()).is_none());
    }

    #[test]
    fn test_thin_sprite_keeps_one_pixel() {
        assert_eq!(SpriteSize::new(1, 200).fit_to_cell(), SpriteSize::new(1, 50));
        assert_eq!(SpriteSize::new(400, 2).fit_to_cell(), SpriteSize::new(50, 1));
    }

    #[test]
    fn test_round_freezes_actor_when_over() {
        let mut round = Round::new(Difficulty::Easy);
        round.outcome = Outcome::Lost;
        assert!(!round.move_actor(Facing::Up));
        assert_eq!(round.actor, Actor::default());
    }

    proptest! {
        #[test]
        fn prop_interior_moves_offset_one_cell(
            col in 1..GRID_WIDTH - 1,
            row in 1..GRID_HEIGHT - 1,
            dir in 0usize..4,
        ) {
            let facing = Facing::ALL[dir];
            let mut actor = Actor { pos: IVec2::new(col, row) * GRID_SIZE, facing: Facing::Up };
            let before = actor.pos;
            prop_assert!(actor.step(facing));
            prop_assert_eq!(actor.pos - before, facing.delta() * GRID_SIZE);
            prop_assert_eq!(actor.facing, facing);
        }

        #[test]
        fn prop_wrapped_obstacle_keeps_lane(
            x in -50.0f32..800.0,
            speed in 0.5f32..10.0,
            right in any::<bool>(),
        ) {
            let heading = if right { Heading::Right } else { Heading::Left };
            let mut car = Obstacle::new(x, 5, speed, heading, 0, SpriteSize::new(50, 30));
            let y = car.pos.y;
            for _ in 0..500 {
                car.advance();
                prop_assert_eq!(car.pos.y, y);
                prop_assert!(car.pos.x >= -car.size.x);
                prop_assert!(car.pos.x <= SCREEN_WIDTH as f32);
            }
        }
    }
}
