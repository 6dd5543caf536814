//! The ball: an entity with a radius and three independent modes

use glam::{Vec2, Vec4};

use super::entity::Entity;

/// Ball-specific state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallKind {
    /// Fixed at construction
    pub radius: f32,
    /// Glued to the paddle; velocity integration is skipped
    pub stuck: bool,
    /// Re-enters `stuck` on the next paddle contact
    pub sticky: bool,
    /// Does not bounce off breakable bricks
    pub pass_through: bool,
}

pub type Ball = Entity<BallKind>;

impl Ball {
    /// New ball, stuck until launched
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Entity::with_kind(
            pos,
            Vec2::splat(radius * 2.0),
            vel,
            Vec4::ONE,
            BallKind {
                radius,
                stuck: true,
                sticky: false,
                pass_through: false,
            },
        )
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.kind.radius
    }

    /// Integrate one step and bounce off the left, right and top walls.
    ///
    /// The floor is open: crossing it is the loss signal, handled by the tick.
    pub fn move_step(&mut self, dt: f32, viewport_width: f32) -> Vec2 {
        if self.kind.stuck {
            return self.pos;
        }

        self.pos += self.vel * dt;

        if self.pos.x <= 0.0 {
            self.vel.x = -self.vel.x;
            self.pos.x = 0.0;
        } else if self.pos.x + self.size.x >= viewport_width {
            self.vel.x = -self.vel.x;
            self.pos.x = viewport_width - self.size.x;
        }

        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = 0.0;
        }

        self.pos
    }

    /// Reposition and strip every mode; the ball is stuck again afterwards
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.pos = pos;
        self.vel = vel;
        self.kind.stuck = true;
        self.kind.sticky = false;
        self.kind.pass_through = false;
        self.color = Vec4::ONE;
    }
}
