//! Shared entity model
//!
//! Paddle, bricks, ball and power-ups all carry the same transform/color/flag
//! state. The type parameter holds the variant-specific payload, so a brick is
//! `Entity`, the ball is `Entity<BallKind>` and a pickup is
//! `Entity<PowerUpKind>`.

use glam::{Vec2, Vec4};

/// A game object. `K` is the variant payload (`()` for plain boxes).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity<K = ()> {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// RGBA tint
    pub color: Vec4,
    /// Immune to destruction
    pub solid: bool,
    /// Skipped for rendering and collision
    pub destroyed: bool,
    pub kind: K,
}

/// Player paddle
pub type Paddle = Entity;
/// A level brick
pub type Brick = Entity;

impl Entity {
    /// Plain white box at rest
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self::with_kind(pos, size, Vec2::ZERO, Vec4::ONE, ())
    }

    /// Move back to `pos` with velocity `vel`
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
    }
}

impl<K> Entity<K> {
    pub fn with_kind(pos: Vec2, size: Vec2, vel: Vec2, color: Vec4, kind: K) -> Self {
        Self {
            pos,
            size,
            vel,
            rotation: 0.0,
            color,
            solid: false,
            destroyed: false,
            kind,
        }
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    pub fn with_solid(mut self, solid: bool) -> Self {
        self.solid = solid;
        self
    }

    /// Center of the bounding box
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Bottom-right corner of the bounding box
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Still takes part in collision and drawing
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_geometry() {
        let e = Brick::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0));
        assert_eq!(e.center(), Vec2::new(25.0, 40.0));
        assert_eq!(e.max(), Vec2::new(40.0, 60.0));
        assert!(e.is_live());
        assert!(!e.solid);
    }

    #[test]
    fn test_reset_moves_and_sets_velocity() {
        let mut e = Brick::new(Vec2::ZERO, Vec2::ONE).with_solid(true);
        e.reset(Vec2::new(5.0, 6.0), Vec2::new(1.0, -1.0));
        assert_eq!(e.pos, Vec2::new(5.0, 6.0));
        assert_eq!(e.vel, Vec2::new(1.0, -1.0));
        assert!(e.solid);
    }
}
