//! Power-up effects and post-process state
//!
//! Effects are plain data: each power-up type maps to a static [`Effect`]
//! entry whose functions act on explicit [`EffectTargets`].

use glam::Vec4;

use super::ball::Ball;
use super::entity::Paddle;
use super::powerup::PowerUpType;
use crate::consts::{PAD_SIZE_INCREASE, SPEED_MULTIPLIER};

/// Post-process flag bits handed to the renderer
pub mod flags {
    pub const NONE: u8 = 0;
    pub const CHAOS: u8 = 1 << 0;
    pub const CONFUSE: u8 = 1 << 1;
    pub const SHAKE: u8 = 1 << 2;
}

pub const STICKY_TINT: Vec4 = Vec4::new(1.0, 0.5, 1.0, 1.0);
pub const PASS_THROUGH_TINT: Vec4 = Vec4::new(1.0, 0.5, 0.5, 1.0);

/// Screen-space effect switches
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostEffects {
    pub confuse: bool,
    pub chaos: bool,
    pub shake: bool,
    shake_time: f32,
}

impl PostEffects {
    /// Shake for `duration` seconds (restarts the timer)
    pub fn start_shake(&mut self, duration: f32) {
        self.shake = true;
        self.shake_time = duration;
    }

    /// Count down the shake timer
    pub fn update(&mut self, dt: f32) {
        if self.shake_time > 0.0 {
            self.shake_time -= dt;
            if self.shake_time <= 0.0 {
                self.shake_time = 0.0;
                self.shake = false;
            }
        }
    }

    pub fn flags(&self) -> u8 {
        let mut bits = flags::NONE;
        if self.chaos {
            bits |= flags::CHAOS;
        }
        if self.confuse {
            bits |= flags::CONFUSE;
        }
        if self.shake {
            bits |= flags::SHAKE;
        }
        bits
    }
}

/// Game state a power-up is allowed to touch
#[derive(Debug)]
pub struct EffectTargets<'a> {
    pub ball: &'a mut Ball,
    pub paddle: &'a mut Paddle,
    pub post: &'a mut PostEffects,
}

/// Activate/undo pair for one power-up type.
///
/// Both functions return whether the side effect counts as handled.
#[derive(Clone, Copy)]
pub struct Effect {
    pub apply: fn(&mut EffectTargets<'_>) -> bool,
    pub revert: fn(&mut EffectTargets<'_>) -> bool,
    /// Undo must wait until no other enabled power-up of the same type remains
    pub shared: bool,
}

/// Effect table entry for a power-up type
pub fn effect(ty: PowerUpType) -> &'static Effect {
    match ty {
        PowerUpType::Speed => &SPEED,
        PowerUpType::Sticky => &STICKY,
        PowerUpType::PassThrough => &PASS_THROUGH,
        PowerUpType::PadSizeIncrease => &PAD_SIZE_INCREASE_EFFECT,
        PowerUpType::Confuse => &CONFUSE,
        PowerUpType::Chaos => &CHAOS,
    }
}

fn no_undo(_: &mut EffectTargets<'_>) -> bool {
    true
}

static SPEED: Effect = Effect {
    apply: speed_up,
    revert: no_undo,
    shared: false,
};

static STICKY: Effect = Effect {
    apply: sticky_on,
    revert: sticky_off,
    shared: true,
};

static PASS_THROUGH: Effect = Effect {
    apply: pass_through_on,
    revert: pass_through_off,
    shared: true,
};

static PAD_SIZE_INCREASE_EFFECT: Effect = Effect {
    apply: grow_paddle,
    revert: no_undo,
    shared: false,
};

static CONFUSE: Effect = Effect {
    apply: confuse_on,
    revert: confuse_off,
    shared: true,
};

static CHAOS: Effect = Effect {
    apply: chaos_on,
    revert: chaos_off,
    shared: true,
};

fn speed_up(t: &mut EffectTargets<'_>) -> bool {
    t.ball.vel *= SPEED_MULTIPLIER;
    true
}

fn sticky_on(t: &mut EffectTargets<'_>) -> bool {
    t.ball.kind.sticky = true;
    t.paddle.color = STICKY_TINT;
    true
}

fn sticky_off(t: &mut EffectTargets<'_>) -> bool {
    t.ball.kind.sticky = false;
    t.paddle.color = Vec4::ONE;
    true
}

fn pass_through_on(t: &mut EffectTargets<'_>) -> bool {
    t.ball.kind.pass_through = true;
    t.ball.color = PASS_THROUGH_TINT;
    true
}

fn pass_through_off(t: &mut EffectTargets<'_>) -> bool {
    t.ball.kind.pass_through = false;
    t.ball.color = Vec4::ONE;
    true
}

fn grow_paddle(t: &mut EffectTargets<'_>) -> bool {
    t.paddle.size.x += PAD_SIZE_INCREASE;
    true
}

// Confuse and chaos never stack: whichever is already running wins.
fn confuse_on(t: &mut EffectTargets<'_>) -> bool {
    if !t.post.chaos {
        t.post.confuse = true;
    }
    true
}

fn confuse_off(t: &mut EffectTargets<'_>) -> bool {
    t.post.confuse = false;
    true
}

fn chaos_on(t: &mut EffectTargets<'_>) -> bool {
    if !t.post.confuse {
        t.post.chaos = true;
    }
    true
}

fn chaos_off(t: &mut EffectTargets<'_>) -> bool {
    t.post.chaos = false;
    true
}
