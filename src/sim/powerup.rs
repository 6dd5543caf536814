//! Power-up pickups and their emitter
//!
//! Lifecycle of one pickup:
//! - falling: `destroyed = false`, `enabled = false`
//! - activated (caught by the paddle): `destroyed = true`, `enabled = true`
//! - expired (duration ran out): `destroyed = true`, `enabled = false`
//!
//! A pickup that falls off screen goes straight to destroyed without ever
//! being enabled. Anything destroyed and not enabled is swept after update.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::effects::{EffectTargets, effect};
use super::entity::Entity;
use super::physics::check_collision_aabb;
use crate::consts::{POWER_UP_SIZE, POWER_UP_VELOCITY};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpType {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpType {
    /// Roll order on brick destruction
    pub const ALL: [PowerUpType; 6] = [
        PowerUpType::Speed,
        PowerUpType::Sticky,
        PowerUpType::PassThrough,
        PowerUpType::PadSizeIncrease,
        PowerUpType::Confuse,
        PowerUpType::Chaos,
    ];

    /// Spawn odds are `1 / spawn_chance()`
    pub fn spawn_chance(self) -> u32 {
        match self {
            PowerUpType::Speed | PowerUpType::Sticky | PowerUpType::PassThrough => 75,
            PowerUpType::PadSizeIncrease | PowerUpType::Chaos => 5,
            // Negative pickups show up more often
            PowerUpType::Confuse => 15,
        }
    }

    /// Active time in seconds; 0 means one-shot
    pub fn duration(self) -> f32 {
        match self {
            PowerUpType::Speed | PowerUpType::PadSizeIncrease => 0.0,
            PowerUpType::Sticky => 20.0,
            PowerUpType::PassThrough => 10.0,
            PowerUpType::Confuse | PowerUpType::Chaos => 15.0,
        }
    }

    pub fn color(self) -> Vec4 {
        match self {
            PowerUpType::Speed => Vec4::new(0.5, 0.5, 1.0, 1.0),
            PowerUpType::Sticky => Vec4::new(1.0, 0.5, 1.0, 1.0),
            PowerUpType::PassThrough => Vec4::new(0.5, 1.0, 0.5, 1.0),
            PowerUpType::PadSizeIncrease => Vec4::new(1.0, 0.6, 0.4, 1.0),
            PowerUpType::Confuse => Vec4::new(1.0, 0.3, 0.3, 1.0),
            PowerUpType::Chaos => Vec4::new(0.9, 0.25, 0.25, 1.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerUpType::Speed => "speed",
            PowerUpType::Sticky => "sticky",
            PowerUpType::PassThrough => "passthrough",
            PowerUpType::PadSizeIncrease => "padsizeincrease",
            PowerUpType::Confuse => "confuse",
            PowerUpType::Chaos => "chaos",
        }
    }
}

/// Power-up specific state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpKind {
    pub ty: PowerUpType,
    /// Remaining active time in seconds
    pub duration: f32,
    pub enabled: bool,
    modifier_handled: bool,
    undo_handled: bool,
}

pub type PowerUp = Entity<PowerUpKind>;

impl PowerUp {
    /// Falling pickup of type `ty` at `pos`
    pub fn new(ty: PowerUpType, pos: Vec2) -> Self {
        Entity::with_kind(
            pos,
            POWER_UP_SIZE,
            POWER_UP_VELOCITY,
            ty.color(),
            PowerUpKind {
                ty,
                duration: ty.duration(),
                enabled: false,
                modifier_handled: false,
                undo_handled: false,
            },
        )
    }

    #[inline]
    pub fn power_up_type(&self) -> PowerUpType {
        self.kind.ty
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.kind.enabled
    }

    /// Destroyed and no longer enabled: safe to drop
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.destroyed && !self.kind.enabled
    }

    /// Falling, not yet caught
    #[inline]
    pub fn is_falling(&self) -> bool {
        !self.destroyed
    }

    /// Fall and count down; returns true when the duration just ran out
    fn advance(&mut self, dt: f32) -> bool {
        self.pos += self.vel * dt;
        if !self.kind.enabled {
            return false;
        }
        self.kind.duration -= dt;
        self.kind.duration <= 0.0
    }
}

/// Owns every pickup currently falling or active
#[derive(Debug, Clone, Default)]
pub struct PowerUpEmitter {
    power_ups: Vec<PowerUp>,
}

impl PowerUpEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn len(&self) -> usize {
        self.power_ups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power_ups.is_empty()
    }

    /// Add a pickup directly
    pub fn push(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    /// Pickups still falling (the ones to draw)
    pub fn visible(&self) -> impl Iterator<Item = &PowerUp> {
        self.power_ups.iter().filter(|p| p.is_falling())
    }

    /// Roll every type independently for a destroyed brick at `pos`.
    ///
    /// Returns how many pickups were spawned.
    pub fn spawn_power_ups<D: Dice + ?Sized>(&mut self, pos: Vec2, dice: &mut D) -> usize {
        let mut spawned = 0;
        for ty in PowerUpType::ALL {
            if dice.one_in(ty.spawn_chance()) {
                self.power_ups.push(PowerUp::new(ty, pos));
                spawned += 1;
            }
        }
        if spawned > 0 {
            log::debug!("Spawned {} power-up(s) at ({:.0}, {:.0})", spawned, pos.x, pos.y);
        }
        spawned
    }

    /// Whether any enabled pickup of `ty` exists
    pub fn is_other_power_up_active(&self, ty: PowerUpType) -> bool {
        self.power_ups
            .iter()
            .any(|p| p.kind.enabled && p.kind.ty == ty)
    }

    /// Check falling pickups against the paddle and activate the caught ones.
    ///
    /// Pickups that reached the bottom of the viewport are destroyed unused.
    /// Returns the types activated this call.
    pub fn do_collisions(
        &mut self,
        viewport_height: f32,
        targets: &mut EffectTargets<'_>,
    ) -> Vec<PowerUpType> {
        let mut activated = Vec::new();
        for power_up in &mut self.power_ups {
            if power_up.destroyed {
                continue;
            }
            if power_up.pos.y >= viewport_height {
                power_up.destroyed = true;
                continue;
            }
            if !check_collision_aabb(&*targets.paddle, &*power_up) {
                continue;
            }

            debug_assert!(!power_up.kind.enabled);
            power_up.destroyed = true;
            power_up.kind.enabled = true;
            if !power_up.kind.modifier_handled {
                power_up.kind.modifier_handled = (effect(power_up.kind.ty).apply)(targets);
            }
            log::debug!("Power-up {} activated", power_up.kind.ty.as_str());
            activated.push(power_up.kind.ty);
        }
        activated
    }

    /// Move pickups, expire active ones and sweep the spent ones.
    ///
    /// Returns the types that expired this call.
    pub fn update(&mut self, dt: f32, targets: &mut EffectTargets<'_>) -> Vec<PowerUpType> {
        let mut expired = Vec::new();
        for i in 0..self.power_ups.len() {
            if !self.power_ups[i].advance(dt) {
                continue;
            }

            let ty = self.power_ups[i].kind.ty;
            self.power_ups[i].kind.enabled = false;
            if self.power_ups[i].kind.undo_handled {
                continue;
            }

            let fx = effect(ty);
            let handled = if fx.shared && self.is_other_power_up_active(ty) {
                // Another pickup of this type still relies on the effect
                true
            } else {
                (fx.revert)(targets)
            };
            self.power_ups[i].kind.undo_handled = handled;
            log::debug!("Power-up {} expired", ty.as_str());
            expired.push(ty);
        }

        self.power_ups.retain(|p| !p.is_spent());
        expired
    }

    /// Switch off every active pickup of `ty` without reverting its effect.
    ///
    /// For when the caller already reset what the effect touched.
    pub fn retire(&mut self, ty: PowerUpType) {
        for power_up in &mut self.power_ups {
            if power_up.kind.enabled && power_up.kind.ty == ty {
                power_up.kind.enabled = false;
                power_up.kind.undo_handled = true;
            }
        }
        self.power_ups.retain(|p| !p.is_spent());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::Ball;
    use crate::sim::effects::{PASS_THROUGH_TINT, PostEffects, STICKY_TINT};
    use crate::sim::entity::Paddle;

    /// Dice that answers `one_in` from a script and counts calls
    struct ScriptedDice {
        answers: Vec<bool>,
        calls: usize,
    }

    impl Dice for ScriptedDice {
        fn one_in(&mut self, _chance: u32) -> bool {
            let answer = self.answers.get(self.calls).copied().unwrap_or(false);
            self.calls += 1;
            answer
        }

        fn uniform(&mut self, low: f32, _high: f32) -> f32 {
            low
        }
    }

    struct World {
        ball: Ball,
        paddle: Paddle,
        post: PostEffects,
    }

    impl World {
        fn new() -> Self {
            let mut ball = Ball::new(Vec2::new(400.0, 300.0), Vec2::new(100.0, -350.0), 12.5);
            ball.kind.stuck = false;
            Self {
                ball,
                paddle: Paddle::new(Vec2::new(350.0, 700.0), Vec2::new(100.0, 20.0)),
                post: PostEffects::default(),
            }
        }

        fn targets(&mut self) -> EffectTargets<'_> {
            EffectTargets {
                ball: &mut self.ball,
                paddle: &mut self.paddle,
                post: &mut self.post,
            }
        }
    }

    /// Pickup resting on the paddle so the next collision pass catches it
    fn on_paddle(ty: PowerUpType) -> PowerUp {
        PowerUp::new(ty, Vec2::new(370.0, 690.0))
    }

    #[test]
    fn test_type_table() {
        assert_eq!(PowerUpType::Speed.spawn_chance(), 75);
        assert_eq!(PowerUpType::Sticky.spawn_chance(), 75);
        assert_eq!(PowerUpType::PassThrough.spawn_chance(), 75);
        assert_eq!(PowerUpType::PadSizeIncrease.spawn_chance(), 5);
        assert_eq!(PowerUpType::Confuse.spawn_chance(), 15);
        assert_eq!(PowerUpType::Chaos.spawn_chance(), 5);
        assert_eq!(PowerUpType::Speed.duration(), 0.0);
        assert_eq!(PowerUpType::Sticky.duration(), 20.0);
        assert_eq!(PowerUpType::PassThrough.duration(), 10.0);
    }

    #[test]
    fn test_spawn_rolls_each_type_once() {
        let mut emitter = PowerUpEmitter::new();
        let mut dice = ScriptedDice {
            answers: vec![true, false, false, true, false, true],
            calls: 0,
        };
        let spawned = emitter.spawn_power_ups(Vec2::new(10.0, 20.0), &mut dice);
        assert_eq!(dice.calls, PowerUpType::ALL.len());
        assert_eq!(spawned, 3);
        let types: Vec<_> = emitter.power_ups().iter().map(|p| p.power_up_type()).collect();
        assert_eq!(
            types,
            vec![PowerUpType::Speed, PowerUpType::PadSizeIncrease, PowerUpType::Chaos]
        );
        let p = &emitter.power_ups()[0];
        assert_eq!(p.pos, Vec2::new(10.0, 20.0));
        assert_eq!(p.vel, POWER_UP_VELOCITY);
        assert_eq!(p.color, PowerUpType::Speed.color());
        assert!(p.is_falling());
    }

    #[test]
    fn test_pickup_falls() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(PowerUp::new(PowerUpType::Sticky, Vec2::new(0.0, 100.0)));
        emitter.update(0.5, &mut w.targets());
        assert_eq!(emitter.power_ups()[0].pos, Vec2::new(0.0, 175.0));
    }

    #[test]
    fn test_caught_pickup_activates_once() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::PassThrough));

        let activated = emitter.do_collisions(720.0, &mut w.targets());
        assert_eq!(activated, vec![PowerUpType::PassThrough]);
        let p = &emitter.power_ups()[0];
        assert!(p.destroyed);
        assert!(p.is_enabled());
        assert!(w.ball.kind.pass_through);

        // Already destroyed: a second pass is a no-op
        assert!(emitter.do_collisions(720.0, &mut w.targets()).is_empty());
        assert_eq!(emitter.visible().count(), 0);
    }

    #[test]
    fn test_missed_pickup_removed_without_effect() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(PowerUp::new(PowerUpType::Sticky, Vec2::new(0.0, 720.0)));

        assert!(emitter.do_collisions(720.0, &mut w.targets()).is_empty());
        assert!(emitter.power_ups()[0].is_spent());
        let expired = emitter.update(0.016, &mut w.targets());
        assert!(expired.is_empty());
        assert!(emitter.is_empty());
        assert!(!w.ball.kind.sticky);
    }

    #[test]
    fn test_one_shot_expires_next_update() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::PadSizeIncrease));
        emitter.do_collisions(720.0, &mut w.targets());
        assert_eq!(w.paddle.size.x, 150.0);
        assert_eq!(emitter.len(), 1);

        let expired = emitter.update(0.016, &mut w.targets());
        assert_eq!(expired, vec![PowerUpType::PadSizeIncrease]);
        assert!(emitter.is_empty());
        assert_eq!(w.paddle.size.x, 150.0);
    }

    #[test]
    fn test_timed_expiry() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::PassThrough));
        emitter.do_collisions(720.0, &mut w.targets());

        assert!(emitter.update(9.0, &mut w.targets()).is_empty());
        assert!(w.ball.kind.pass_through);
        assert_eq!(emitter.update(1.5, &mut w.targets()), vec![PowerUpType::PassThrough]);
        assert!(!w.ball.kind.pass_through);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_suppression_keeps_shared_effect() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::Sticky));
        emitter.do_collisions(720.0, &mut w.targets());
        // Let the first one run down a bit before catching the second
        emitter.update(5.0, &mut w.targets());
        emitter.push(on_paddle(PowerUpType::Sticky));
        emitter.do_collisions(720.0, &mut w.targets());
        assert_eq!(
            emitter.power_ups().iter().filter(|p| p.is_enabled()).count(),
            2
        );

        // First expires: second still needs the effect
        emitter.update(15.5, &mut w.targets());
        assert_eq!(emitter.len(), 1);
        assert!(w.ball.kind.sticky);
        assert_eq!(w.paddle.color, STICKY_TINT);
        assert!(emitter.is_other_power_up_active(PowerUpType::Sticky));

        // Last one expires: effect is undone
        emitter.update(5.0, &mut w.targets());
        assert!(emitter.is_empty());
        assert!(!w.ball.kind.sticky);
        assert_eq!(w.paddle.color, Vec4::ONE);
    }

    #[test]
    fn test_confuse_suppressed_by_other_confuse() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::Confuse));
        emitter.do_collisions(720.0, &mut w.targets());
        emitter.update(10.0, &mut w.targets());
        emitter.push(on_paddle(PowerUpType::Confuse));
        emitter.do_collisions(720.0, &mut w.targets());

        emitter.update(6.0, &mut w.targets());
        assert!(w.post.confuse);
        emitter.update(10.0, &mut w.targets());
        assert!(!w.post.confuse);
    }

    #[test]
    fn test_pass_through_suppressed_by_other_pass_through() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::PassThrough));
        emitter.do_collisions(720.0, &mut w.targets());
        emitter.update(5.0, &mut w.targets());
        emitter.push(on_paddle(PowerUpType::PassThrough));
        emitter.do_collisions(720.0, &mut w.targets());

        // First runs out at 10 s
        assert_eq!(
            emitter.update(5.5, &mut w.targets()),
            vec![PowerUpType::PassThrough]
        );
        assert!(w.ball.kind.pass_through);
        assert_eq!(w.ball.color, PASS_THROUGH_TINT);

        emitter.update(5.0, &mut w.targets());
        assert!(emitter.is_empty());
        assert!(!w.ball.kind.pass_through);
        assert_eq!(w.ball.color, Vec4::ONE);
    }

    #[test]
    fn test_chaos_suppressed_by_other_chaos() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::Chaos));
        emitter.do_collisions(720.0, &mut w.targets());
        emitter.update(10.0, &mut w.targets());
        emitter.push(on_paddle(PowerUpType::Chaos));
        emitter.do_collisions(720.0, &mut w.targets());
        assert!(w.post.chaos);

        assert_eq!(emitter.update(5.5, &mut w.targets()), vec![PowerUpType::Chaos]);
        assert!(w.post.chaos);
        assert!(emitter.is_other_power_up_active(PowerUpType::Chaos));

        assert_eq!(emitter.update(10.0, &mut w.targets()), vec![PowerUpType::Chaos]);
        assert!(!w.post.chaos);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_retire_skips_revert() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(on_paddle(PowerUpType::Sticky));
        emitter.push(on_paddle(PowerUpType::Chaos));
        emitter.push(PowerUp::new(PowerUpType::Sticky, Vec2::ZERO));
        emitter.do_collisions(720.0, &mut w.targets());

        emitter.retire(PowerUpType::Sticky);
        // Falling Sticky and active Chaos stay
        assert_eq!(emitter.len(), 2);
        assert!(!emitter.is_other_power_up_active(PowerUpType::Sticky));
        assert!(emitter.is_other_power_up_active(PowerUpType::Chaos));
        // Revert is left to the caller
        assert!(w.ball.kind.sticky);

        w.ball.kind.sticky = false;
        let expired = emitter.update(20.0, &mut w.targets());
        assert_eq!(expired, vec![PowerUpType::Chaos]);
        assert!(!w.ball.kind.sticky);
    }

    #[test]
    fn test_other_active_ignores_falling_and_other_types() {
        let mut w = World::new();
        let mut emitter = PowerUpEmitter::new();
        emitter.push(PowerUp::new(PowerUpType::Sticky, Vec2::ZERO));
        emitter.push(on_paddle(PowerUpType::Chaos));
        emitter.do_collisions(720.0, &mut w.targets());
        assert!(!emitter.is_other_power_up_active(PowerUpType::Sticky));
        assert!(emitter.is_other_power_up_active(PowerUpType::Chaos));
    }
}
