//! Breakout - a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, particles)
//! - `render`: Render-surface boundary (sprite instances, draw order)
//! - `settings`: Player/config preferences loaded from JSON

pub mod render;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default viewport dimensions (pixels)
    pub const VIEWPORT_WIDTH: f32 = 1280.0;
    pub const VIEWPORT_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PLAYER_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    pub const PLAYER_VELOCITY: f32 = 500.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -350.0);
    /// Horizontal deflection strength when the ball leaves the paddle
    pub const PADDLE_DEFLECTION: f32 = 2.0;

    /// Hard maximum number of bricks in a level
    pub const MAX_BRICKS: usize = 1024;

    /// Screen shake duration after hitting a solid brick (seconds)
    pub const SHAKE_DURATION: f32 = 0.05;

    /// Power-up pickup defaults
    pub const POWER_UP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWER_UP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// Paddle width gained from a size-increase pickup
    pub const PAD_SIZE_INCREASE: f32 = 50.0;
    /// Ball velocity multiplier from a speed pickup
    pub const SPEED_MULTIPLIER: f32 = 1.2;

    /// Ball trail particles (pool capacity comes from the quality preset)
    pub const PARTICLES_PER_TICK: usize = 2;
    pub const PARTICLE_LIFETIME: f32 = 1.0;
    pub const PARTICLE_FADE_RATE: f32 = 2.5;
    pub const PARTICLE_SCALE: f32 = 10.0;
    /// Fraction of the parent velocity a fresh particle inherits
    pub const PARTICLE_VELOCITY_FACTOR: f32 = 0.1;
}
