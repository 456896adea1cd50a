//! Axis-aligned rectangle overlap
//!
//! The only physics in the game: actor box against obstacle boxes.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True when the two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if !self.has_area() || !other.has_area() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    /// Both sides strictly positive
    pub fn has_area(&self) -> bool {
        self.size.cmpgt(Vec2::ZERO).all()
    }
}

/// Index of the first obstacle (in spawn order) overlapping `rect`
pub fn first_overlap(rect: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| rect.overlaps(&o.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Heading, SpriteSize};

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0));
        let b = Rect::new(Vec2::new(25.0, 25.0), Vec2::new(50.0, 50.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Contained
        let c = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0));
        let right = Rect::new(Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0));
        let below = Rect::new(Vec2::new(0.0, 50.0), Vec2::new(50.0, 50.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(50.0, 50.0));
        let empty = Rect::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert!(!a.overlaps(&empty));
        assert!(!empty.overlaps(&a));

        // Zero width or zero height alone is enough
        let line = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(0.0, 50.0));
        let flat = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(50.0, 0.0));
        assert!(!a.overlaps(&line));
        assert!(!flat.overlaps(&a));
        assert!(!empty.has_area());
        assert!(a.has_area());
    }

    #[test]
    fn test_first_overlap_in_spawn_order() {
        let size = SpriteSize::new(50, 30);
        let obstacles = vec![
            Obstacle::new(300.0, 3, 1.0, Heading::Right, 0, size),
            Obstacle::new(110.0, 3, 1.0, Heading::Right, 0, size),
            Obstacle::new(90.0, 3, 1.0, Heading::Right, 0, size),
        ];
        let actor = Rect::new(Vec2::new(100.0, 150.0), Vec2::splat(50.0));
        assert_eq!(first_overlap(&actor, &obstacles), Some(1));

        let elsewhere = Rect::new(Vec2::new(100.0, 500.0), Vec2::splat(50.0));
        assert_eq!(first_overlap(&elsewhere, &obstacles), None);
    }
}
