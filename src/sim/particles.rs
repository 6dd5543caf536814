//! Fixed-capacity particle pool trailing the ball
//!
//! Slots are allocated once and overwritten in place; dead particles stay in
//! the pool until a new spawn claims them.

use glam::{Vec2, Vec4};

use super::dice::Dice;
use super::entity::Entity;
use crate::consts::{
    PARTICLE_FADE_RATE, PARTICLE_LIFETIME, PARTICLE_SCALE, PARTICLE_VELOCITY_FACTOR,
    PARTICLES_PER_TICK,
};

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Alpha fades while the particle lives
    pub color: Vec4,
    /// Seconds left; at or below zero the particle is inert
    pub life: f32,
    pub scale: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec4::ONE,
            life: 0.0,
            scale: PARTICLE_SCALE,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Ring-recycled particle buffer
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    last_used: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            last_used: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Particles worth drawing
    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Spawn the per-tick trail particles for `parent`, then age every particle
    pub fn update<K, D: Dice + ?Sized>(&mut self, dt: f32, parent: &Entity<K>, dice: &mut D) {
        let offset = parent.size * 0.5;
        for _ in 0..PARTICLES_PER_TICK {
            self.emit(parent, offset, dice);
        }

        for particle in &mut self.particles {
            particle.life -= dt;
            if particle.life > 0.0 {
                // Trail backward along the parent's motion
                particle.pos -= particle.vel * dt;
                particle.color.w -= dt * PARTICLE_FADE_RATE;
            }
        }
    }

    /// Respawn one slot at `parent`; returns the slot index used
    pub fn emit<K, D: Dice + ?Sized>(
        &mut self,
        parent: &Entity<K>,
        offset: Vec2,
        dice: &mut D,
    ) -> Option<usize> {
        if self.particles.is_empty() {
            return None;
        }

        let index = self.available_index();
        let jitter = dice.uniform(-5.0, 5.0);
        let shade = dice.uniform(0.5, 1.5);

        let particle = &mut self.particles[index];
        particle.pos = parent.pos + Vec2::splat(jitter) + offset;
        particle.color = Vec4::new(shade, shade, shade, 1.0);
        particle.life = PARTICLE_LIFETIME;
        particle.vel = parent.vel * PARTICLE_VELOCITY_FACTOR;
        Some(index)
    }

    /// First dead slot scanning forward from the last one used, wrapping once.
    /// With every slot alive, slot 0 is recycled.
    fn available_index(&mut self) -> usize {
        let found = (self.last_used..self.particles.len())
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());

        self.last_used = found.unwrap_or(0);
        self.last_used
    }
}
