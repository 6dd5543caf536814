//! Per-frame simulation tick
//!
//! Order within a frame: input, ball movement, brick collisions, paddle
//! collision, power-ups, particles, post-process timers, loss check and
//! level completion.

use glam::Vec2;

use super::ball::Ball;
use super::dice::Dice;
use super::effects::EffectTargets;
use super::level::Level;
use super::physics::{CollisionResult, Direction, check_collision_circle_aabb};
use super::powerup::PowerUpType;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Release a stuck ball
    pub launch: bool,
}

/// Advance the game state by one step
pub fn tick<D: Dice>(state: &mut GameState<D>, input: &TickInput, dt: f32) {
    if state.phase == GamePhase::Won {
        return;
    }
    state.time_ticks += 1;

    process_input(state, input, dt);
    update(state, dt);
}

/// Move the paddle (and a stuck ball with it) and handle launch
pub fn process_input<D: Dice>(state: &mut GameState<D>, input: &TickInput, dt: f32) {
    let velocity = state.paddle_speed * dt;
    // Bounds are checked against where the paddle was at the start of the frame
    let paddle_x = state.paddle.pos.x;
    let stuck = state.ball.kind.stuck;

    if input.left && paddle_x >= 0.0 {
        state.paddle.pos.x -= velocity;
        if stuck {
            state.ball.pos.x -= velocity;
        }
    }
    if input.right && paddle_x <= state.viewport.x - state.paddle.size.x {
        state.paddle.pos.x += velocity;
        if stuck {
            state.ball.pos.x += velocity;
        }
    }
    if input.launch && stuck {
        state.ball.kind.stuck = false;
        log::debug!("Ball launched");
    }
}

/// Everything after input for one frame
pub fn update<D: Dice>(state: &mut GameState<D>, dt: f32) {
    state.ball.move_step(dt, state.viewport.x);

    do_collisions(state);

    let mut targets = EffectTargets {
        ball: &mut state.ball,
        paddle: &mut state.paddle,
        post: &mut state.post,
    };
    let activated = state.power_ups.do_collisions(state.viewport.y, &mut targets);
    let expired = state.power_ups.update(dt, &mut targets);
    state
        .events
        .extend(activated.into_iter().map(GameEvent::PowerUpActivated));
    state
        .events
        .extend(expired.into_iter().map(GameEvent::PowerUpExpired));

    state.particles.update(dt, &state.ball, &mut state.dice);
    state.post.update(dt);

    if !check_loss(state) {
        check_completion(state);
    }
}

/// Resolve ball/brick and ball/paddle contacts for the current positions
pub fn do_collisions<D: Dice>(state: &mut GameState<D>) {
    if let Some(level) = state.levels.get_mut(state.level_index) {
        for index in 0..level.len() {
            let Some(brick) = level.brick_mut(index) else {
                continue;
            };
            if brick.destroyed {
                continue;
            }

            let result = check_collision_circle_aabb(&state.ball, &*brick);
            if !result.hit {
                continue;
            }

            if !brick.solid {
                brick.destroyed = true;
                let spawned = state.power_ups.spawn_power_ups(brick.pos, &mut state.dice);
                state
                    .events
                    .push(GameEvent::BrickDestroyed { index, spawned });
            } else {
                if state.shake_enabled {
                    state.post.start_shake(SHAKE_DURATION);
                }
                state.events.push(GameEvent::SolidBrickHit { index });
            }

            if state.ball.kind.pass_through && !brick.solid {
                continue;
            }
            resolve_brick_hit(&mut state.ball, &result);
        }
    }

    if state.ball.kind.stuck {
        return;
    }
    let result = check_collision_circle_aabb(&state.ball, &state.paddle);
    if !result.hit {
        return;
    }

    let radius = state.ball.radius();
    let half_width = state.paddle.size.x / 2.0;
    let center_board = state.paddle.pos.x + half_width;
    let distance = (state.ball.pos.x + radius) - center_board;
    let amount = distance / half_width;

    let old = state.ball.vel;
    let bounced = Vec2::new(
        INITIAL_BALL_VELOCITY.x * amount * PADDLE_DEFLECTION,
        -old.y.abs(),
    );
    state.ball.vel = bounced.normalize_or_zero() * old.length();

    if state.ball.kind.sticky {
        state.ball.kind.stuck = true;
        state.ball.pos.y = state.paddle.pos.y - radius * 2.0;
        // Keep the center over the paddle after a corner hit
        let center_x =
            (state.ball.pos.x + radius).clamp(state.paddle.pos.x, state.paddle.max().x);
        state.ball.pos.x = center_x - radius;
    }
    state.events.push(GameEvent::PaddleHit);
}

/// Bounce the ball off a brick and push it back out along the hit axis
fn resolve_brick_hit(ball: &mut Ball, result: &CollisionResult) {
    let radius = ball.radius();
    if result.direction.is_horizontal() {
        ball.vel.x = -ball.vel.x;
        let penetration = radius - result.penetration.x.abs();
        if result.direction == Direction::Left {
            ball.pos.x += penetration;
        } else {
            ball.pos.x -= penetration;
        }
    } else {
        ball.vel.y = -ball.vel.y;
        let penetration = radius - result.penetration.y.abs();
        if result.direction == Direction::Up {
            ball.pos.y -= penetration;
        } else {
            ball.pos.y += penetration;
        }
    }
}

/// Ball past the bottom edge: rebuild the level and reset the player.
///
/// Returns true when the ball was lost.
pub fn check_loss<D: Dice>(state: &mut GameState<D>) -> bool {
    if state.ball.pos.y < state.viewport.y {
        return false;
    }

    log::info!("Ball lost on level {}", state.level_index + 1);
    state.events.push(GameEvent::BallLost);
    state.reset_level();
    state.reset_player();
    true
}

fn check_completion<D: Dice>(state: &mut GameState<D>) {
    if state.level().is_some_and(Level::is_completed) {
        state.advance_level();
    }
}

/// Horizontal slack before the autopilot bothers moving
const AUTOPILOT_DEAD_ZONE: f32 = 8.0;

/// Demo-mode input: launch when stuck and keep the paddle under the ball.
///
/// While the ball is rising the paddle goes after the lowest helpful pickup.
pub fn autopilot_input<D: Dice>(state: &GameState<D>) -> TickInput {
    let ball_x = state.ball.center().x;

    let pickup_x = if state.ball.vel.y < 0.0 {
        state
            .power_ups
            .visible()
            .filter(|p| !matches!(p.power_up_type(), PowerUpType::Confuse | PowerUpType::Chaos))
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|p| p.center().x)
    } else {
        None
    };

    let target_x = pickup_x.unwrap_or(ball_x);
    let paddle_x = state.paddle.center().x;

    TickInput {
        left: target_x < paddle_x - AUTOPILOT_DEAD_ZONE,
        right: target_x > paddle_x + AUTOPILOT_DEAD_ZONE,
        launch: state.ball.kind.stuck,
    }
}
