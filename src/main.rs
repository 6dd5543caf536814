//! Breakout - headless demo entry point
//!
//! Usage: `breakout [settings.json] [frames] [low|medium|high]`
//!
//! Runs the simulation under the autopilot at the fixed timestep and feeds a
//! sprite batch every frame, standing in for a windowed renderer.

use breakout::{QualityPreset, Settings};
use breakout::consts::SIM_DT;
use breakout::render::{GameTextures, SpriteBatch, TextureRegistry, draw_frame};
use breakout::sim::{GameEvent, GamePhase, GameState, autopilot_input, tick};

/// Two minutes of play at 60 Hz
const DEFAULT_FRAMES: u64 = 60 * 120;

fn main() {
    env_logger::init();
    log::info!("Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Invalid frame count ({}), using {}", e, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };
    if let Some(name) = args.next() {
        match QualityPreset::parse(&name) {
            Some(preset) => settings.quality = preset,
            None => log::warn!(
                "Unknown quality preset '{}', keeping {}",
                name,
                settings.quality.as_str()
            ),
        }
    }
    log::info!(
        "Quality {} ({} particles)",
        settings.quality.as_str(),
        settings.max_particles()
    );

    let levels = settings.load_levels();
    log::info!("Loaded {} levels", levels.len());
    if levels.is_empty() {
        log::error!("No playable levels; check the `levels` list in the settings");
        std::process::exit(1);
    }

    let mut registry = TextureRegistry::new();
    let textures = GameTextures::register(&mut registry);
    let mut state = GameState::new(&settings, levels);
    let mut batch = SpriteBatch::new();

    let mut bricks_destroyed = 0usize;
    let mut balls_lost = 0usize;
    let mut power_ups = 0usize;
    let mut instance_bytes = 0usize;

    for _ in 0..frames {
        let input = autopilot_input(&state);
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                GameEvent::BallLost => balls_lost += 1,
                GameEvent::PowerUpActivated(ty) => {
                    power_ups += 1;
                    log::debug!("Caught {}", ty.as_str());
                }
                GameEvent::LevelCompleted { index } => {
                    log::info!("Cleared level {}", index + 1);
                }
                _ => {}
            }
        }

        batch.clear();
        draw_frame(&state, &textures, &mut batch);
        instance_bytes += batch.sprite_bytes().len() + batch.particle_bytes().len();

        if state.phase == GamePhase::Won {
            log::info!("All levels cleared after {} ticks", state.time_ticks);
            break;
        }
    }

    log::info!(
        "Session over: {} ticks, level {}, {} bricks destroyed, {} balls lost, {} power-ups caught, {} frames drawn ({} KiB of instance data)",
        state.time_ticks,
        state.level_index + 1,
        bricks_destroyed,
        balls_lost,
        power_ups,
        batch.frames,
        instance_bytes / 1024
    );
}
