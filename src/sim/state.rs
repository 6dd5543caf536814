//! Game state and core simulation types
//!
//! The state owns every entity for the duration of a frame: the paddle and
//! ball, the loaded levels, the power-up emitter and the particle pool.

use glam::{Vec2, Vec4};

use super::ball::Ball;
use super::dice::{Dice, SimRng};
use super::effects::PostEffects;
use super::entity::Paddle;
use super::level::Level;
use super::particles::ParticlePool;
use super::powerup::{PowerUpEmitter, PowerUpType};
use crate::consts::*;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Bricks left to break
    Active,
    /// Every level cleared
    Won,
}

/// Something that happened during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Breakable brick destroyed; `spawned` pickups rolled out of it
    BrickDestroyed { index: usize, spawned: usize },
    SolidBrickHit { index: usize },
    PaddleHit,
    PowerUpActivated(PowerUpType),
    PowerUpExpired(PowerUpType),
    /// Ball fell past the bottom edge
    BallLost,
    LevelCompleted { index: usize },
    GameWon,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<D: Dice = SimRng> {
    /// Viewport size in pixels, fixed at construction
    pub viewport: Vec2,
    pub phase: GamePhase,
    pub levels: Vec<Level>,
    /// Index into `levels`
    pub level_index: usize,
    pub paddle: Paddle,
    pub ball: Ball,
    pub power_ups: PowerUpEmitter,
    /// Ball trail (visual only)
    pub particles: ParticlePool,
    pub post: PostEffects,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub dice: D,
    /// Paddle speed in pixels per second
    pub paddle_speed: f32,
    /// Solid-brick hits shake the screen
    pub shake_enabled: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a game seeded from settings (random seed when none is set)
    pub fn new(settings: &Settings, levels: Vec<Level>) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Starting game with seed {}", seed);
        Self::with_dice(settings, levels, SimRng::new(seed))
    }
}

impl<D: Dice> GameState<D> {
    /// Create a game with an explicit randomness source
    pub fn with_dice(settings: &Settings, levels: Vec<Level>, dice: D) -> Self {
        let viewport = settings.viewport();
        let paddle_pos = paddle_start(viewport);
        let paddle = Paddle::new(paddle_pos, PLAYER_SIZE);
        let ball = Ball::new(ball_start(paddle_pos), INITIAL_BALL_VELOCITY, BALL_RADIUS);

        if levels.is_empty() {
            log::warn!("No levels loaded; the ball has nothing to break");
        }

        Self {
            viewport,
            phase: GamePhase::Active,
            levels,
            level_index: 0,
            paddle,
            ball,
            power_ups: PowerUpEmitter::new(),
            particles: ParticlePool::new(settings.max_particles()),
            post: PostEffects::default(),
            events: Vec::new(),
            dice,
            paddle_speed: settings.paddle_speed,
            shake_enabled: settings.effective_screen_shake(),
            time_ticks: 0,
        }
    }

    /// Level currently being played
    pub fn level(&self) -> Option<&Level> {
        self.levels.get(self.level_index)
    }

    pub fn level_mut(&mut self) -> Option<&mut Level> {
        self.levels.get_mut(self.level_index)
    }

    /// Rebuild the current level's bricks
    pub fn reset_level(&mut self) {
        match self.levels.get_mut(self.level_index) {
            Some(level) => level.reset(),
            None => log::error!("Level not found for index {}", self.level_index),
        }
    }

    /// Put the paddle and ball back at their start positions.
    ///
    /// Active Sticky and PassThrough pickups are retired along with the ball
    /// modes they set.
    pub fn reset_player(&mut self) {
        self.paddle.size = PLAYER_SIZE;
        self.paddle.color = Vec4::ONE;
        self.power_ups.retire(PowerUpType::Sticky);
        self.power_ups.retire(PowerUpType::PassThrough);
        let start = paddle_start(self.viewport);
        self.paddle.reset(start, Vec2::ZERO);
        self.ball.reset(ball_start(start), INITIAL_BALL_VELOCITY);
    }

    /// Move on to the next level, or finish the game after the last one
    pub fn advance_level(&mut self) {
        let finished = self.level_index;
        self.events.push(GameEvent::LevelCompleted { index: finished });

        if finished + 1 < self.levels.len() {
            self.level_index = finished + 1;
            log::info!("Level {} complete, starting level {}", finished + 1, finished + 2);
            self.reset_level();
            self.reset_player();
        } else {
            log::info!("All {} levels complete", self.levels.len());
            self.phase = GamePhase::Won;
            self.events.push(GameEvent::GameWon);
        }
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Post-process flag bits for the renderer
    pub fn post_flags(&self) -> u8 {
        self.post.flags()
    }
}

/// Paddle start position: centered on the bottom edge
pub fn paddle_start(viewport: Vec2) -> Vec2 {
    Vec2::new(
        viewport.x / 2.0 - PLAYER_SIZE.x / 2.0,
        viewport.y - PLAYER_SIZE.y,
    )
}

/// Ball start position: resting on top of the paddle's center
pub fn ball_start(paddle_pos: Vec2) -> Vec2 {
    paddle_pos + Vec2::new(PLAYER_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
}
