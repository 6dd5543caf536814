//! Render-surface boundary
//!
//! The simulation never talks to a GPU. Each frame [`draw_frame`] walks the
//! game state in draw order and hands plain [`SpriteInstance`]s to a
//! [`RenderSink`]; whatever owns the window uploads them.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

use crate::sim::{Dice, Entity, GameState, PowerUpType};

/// One textured quad, laid out for direct upload as instance data
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Top-left corner in pixels
    pub position: [f32; 2],
    pub size: [f32; 2],
    /// Degrees, around the quad center
    pub rotation: f32,
    pub texture: u32,
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub fn new(
        position: Vec2,
        size: Vec2,
        rotation: f32,
        texture: TextureHandle,
        color: Vec4,
    ) -> Self {
        Self {
            position: position.to_array(),
            size: size.to_array(),
            rotation,
            texture: texture.0,
            color: color.to_array(),
        }
    }

    fn from_entity<K>(entity: &Entity<K>, texture: TextureHandle) -> Self {
        Self::new(entity.pos, entity.size, entity.rotation, texture, entity.color)
    }
}

/// Opaque texture id handed out by a [`TextureRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u32);

impl TextureHandle {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Name-to-handle table owned by whoever sets up rendering
#[derive(Debug, Default)]
pub struct TextureRegistry {
    names: Vec<String>,
    by_name: HashMap<String, TextureHandle>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `name`, allocating one on first use
    pub fn register(&mut self, name: &str) -> TextureHandle {
        if let Some(&handle) = self.by_name.get(name) {
            return handle;
        }
        let handle = TextureHandle(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), handle);
        handle
    }

    pub fn get(&self, name: &str) -> Option<TextureHandle> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Handles for every texture a frame needs
#[derive(Debug, Clone)]
pub struct GameTextures {
    pub background: TextureHandle,
    pub brick: TextureHandle,
    pub brick_solid: TextureHandle,
    pub ball: TextureHandle,
    pub paddle: TextureHandle,
    pub particle: TextureHandle,
    power_ups: [TextureHandle; 6],
}

impl GameTextures {
    pub fn register(registry: &mut TextureRegistry) -> Self {
        Self {
            background: registry.register("background"),
            brick: registry.register("brick"),
            brick_solid: registry.register("brick_solid"),
            ball: registry.register("face"),
            paddle: registry.register("paddle"),
            particle: registry.register("particle"),
            power_ups: PowerUpType::ALL
                .map(|ty| registry.register(&format!("powerup_{}", ty.as_str()))),
        }
    }

    pub fn power_up(&self, ty: PowerUpType) -> TextureHandle {
        let index = PowerUpType::ALL.iter().position(|&t| t == ty).unwrap_or(0);
        self.power_ups[index]
    }
}

/// Receiver of a frame's draw calls
pub trait RenderSink {
    fn draw_sprite(&mut self, sprite: SpriteInstance);

    /// Trail particles use their own (additive) pipeline
    fn draw_particle(&mut self, sprite: SpriteInstance);

    /// End of frame; `post_flags` uses the bits in [`crate::sim::effects::flags`]
    fn finish(&mut self, post_flags: u8);
}

/// Buffers one frame of draw calls
#[derive(Debug, Default)]
pub struct SpriteBatch {
    pub sprites: Vec<SpriteInstance>,
    pub particles: Vec<SpriteInstance>,
    pub post_flags: u8,
    /// Frames finished since creation
    pub frames: u64,
}

impl SpriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the buffered calls, keeping allocations
    pub fn clear(&mut self) {
        self.sprites.clear();
        self.particles.clear();
        self.post_flags = 0;
    }

    /// Raw bytes of the sprite instances for a vertex buffer upload
    pub fn sprite_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sprites)
    }

    /// Raw bytes of the particle instances
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }
}

impl RenderSink for SpriteBatch {
    fn draw_sprite(&mut self, sprite: SpriteInstance) {
        self.sprites.push(sprite);
    }

    fn draw_particle(&mut self, sprite: SpriteInstance) {
        self.particles.push(sprite);
    }

    fn finish(&mut self, post_flags: u8) {
        self.post_flags = post_flags;
        self.frames += 1;
    }
}

/// Issue one frame: background, bricks, paddle, particles, ball, falling
/// power-ups, then the post-process flags
pub fn draw_frame<D: Dice, S: RenderSink + ?Sized>(
    state: &GameState<D>,
    textures: &GameTextures,
    sink: &mut S,
) {
    sink.draw_sprite(SpriteInstance::new(
        Vec2::ZERO,
        state.viewport,
        0.0,
        textures.background,
        Vec4::ONE,
    ));

    if let Some(level) = state.level() {
        for (_, brick) in level.visible_bricks() {
            let texture = if brick.solid {
                textures.brick_solid
            } else {
                textures.brick
            };
            sink.draw_sprite(SpriteInstance::from_entity(brick, texture));
        }
    }

    sink.draw_sprite(SpriteInstance::from_entity(&state.paddle, textures.paddle));

    for particle in state.particles.live() {
        sink.draw_particle(SpriteInstance::new(
            particle.pos,
            Vec2::splat(particle.scale),
            0.0,
            textures.particle,
            particle.color,
        ));
    }

    sink.draw_sprite(SpriteInstance::from_entity(&state.ball, textures.ball));

    for power_up in state.power_ups.visible() {
        sink.draw_sprite(SpriteInstance::from_entity(
            power_up,
            textures.power_up(power_up.power_up_type()),
        ));
    }

    sink.finish(state.post_flags());
}
