//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded or injected randomness only (see [`Dice`])
//! - Stable iteration order (brick grid index, power-up spawn order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod dice;
pub mod effects;
pub mod entity;
pub mod level;
pub mod particles;
pub mod physics;
pub mod powerup;
pub mod state;
pub mod tick;

pub use ball::{Ball, BallKind};
pub use dice::{Dice, SimRng};
pub use effects::{Effect, EffectTargets, PostEffects, effect};
pub use entity::{Brick, Entity, Paddle};
pub use level::{Level, LevelError, TileGrid};
pub use particles::{Particle, ParticlePool};
pub use physics::{CollisionResult, Direction, check_collision_aabb, check_collision_circle_aabb};
pub use powerup::{PowerUp, PowerUpEmitter, PowerUpKind, PowerUpType};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_input, tick};
