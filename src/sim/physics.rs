//! Collision detection between the ball and axis-aligned boxes
//!
//! Screen space: x grows to the right, y grows downward. All tests are
//! boundary-inclusive, so touching shapes count as colliding.

use glam::Vec2;

use super::ball::Ball;
use super::entity::Entity;

/// Dominant axis of a ball/box contact.
///
/// Names the compass vector the displacement (contact point minus ball
/// center) lines up with best: `Up` is `(0, 1)`, `Right` is `(1, 0)`,
/// `Down` is `(0, -1)`, `Left` is `(-1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Enumeration order doubles as the tie-break order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn compass(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, 1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball/box collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Dominant contact axis (`Up` on a miss)
    pub direction: Direction,
    /// Raw displacement from ball center to the closest box point
    pub penetration: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            penetration: Vec2::ZERO,
        }
    }
}

/// True iff the two bounding boxes overlap on both axes
pub fn check_collision_aabb<A, B>(a: &Entity<A>, b: &Entity<B>) -> bool {
    let x_overlap = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let y_overlap = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    x_overlap && y_overlap
}

/// Circle vs box test.
///
/// Clamps the center-to-center difference to the box half extents to find the
/// box point closest to the circle center; hits when that point lies within
/// the radius.
pub fn check_collision_circle_aabb<K>(ball: &Ball, target: &Entity<K>) -> CollisionResult {
    let radius = ball.radius();
    let center = ball.pos + Vec2::splat(radius);

    let half_extents = target.size * 0.5;
    let box_center = target.pos + half_extents;

    let clamped = (center - box_center).clamp(-half_extents, half_extents);
    let closest = box_center + clamped;

    let difference = closest - center;
    if difference.length() <= radius {
        CollisionResult {
            hit: true,
            direction: vector_direction(difference),
            penetration: difference,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Compass direction best matching `target` (maximum dot product).
///
/// Ties go to the earlier entry of [`Direction::ALL`]; a zero vector maps to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let unit = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = f32::NEG_INFINITY;
    for dir in Direction::ALL {
        let dot = unit.dot(dir.compass());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}
