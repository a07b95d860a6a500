//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use rand::Rng;

use super::color::GameColor;
use super::contact::{ResolverAction, resolve_contact};
use super::physics;
use super::state::{Entity, GameState};
use crate::config::GameConfig;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest pointer x in field space; the host overwrites it, never queues
    pub pointer_x: Option<f32>,
    /// Idle/demo mode - the paddle follows the ball on its own
    pub idle_mode: bool,
}

/// Something the host may want to react to (sound, HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A block was removed and the score went up by one
    BlockDestroyed { id: u32, color: GameColor, score: u64 },
    /// The ball bounced off the paddle
    PaddleHit,
    /// The last block is gone
    FieldCleared,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, config: &GameConfig, dt: f32) -> Vec<GameEvent> {
    state.time_ticks += 1;

    let pointer_x = if input.idle_mode {
        Some(state.ball.rect.center.x + state.autoplay_offset)
    } else {
        input.pointer_x
    };
    if let Some(x) = pointer_x {
        let field = state.field;
        state.paddle.follow_pointer(x, &field, config.clamp_paddle);
    }

    let contacts = {
        let mut obstacles: Vec<&Entity> = Vec::with_capacity(state.blocks.len() + 1);
        obstacles.push(&state.paddle.body);
        obstacles.extend(state.blocks.iter());
        physics::step(&mut state.ball, &obstacles, &state.field, dt)
    };

    let mut events = Vec::new();
    for contact in &contacts {
        let action = resolve_contact(contact);
        apply_action(state, action, config, &mut events);
    }

    if input.idle_mode && events.contains(&GameEvent::PaddleHit) {
        reroll_autoplay_offset(state);
    }

    events
}

/// Carry out the side effects of a resolved contact
pub fn apply_action(
    state: &mut GameState,
    action: ResolverAction,
    config: &GameConfig,
    events: &mut Vec<GameEvent>,
) {
    match action {
        ResolverAction::RemoveBlockAndScore { block } => {
            let Some(removed) = state.remove_block(block) else {
                return;
            };
            state.score += 1;
            log::info!("Score: {}", state.score);

            speed_up_ball(state, removed.color, config);

            events.push(GameEvent::BlockDestroyed {
                id: removed.id,
                color: removed.color,
                score: state.score,
            });
            if state.is_cleared() {
                log::info!("Field cleared at tick {}", state.time_ticks);
                events.push(GameEvent::FieldCleared);
            }
        }
        ResolverAction::PlayPaddleSound => events.push(GameEvent::PaddleHit),
        ResolverAction::NoOp => {}
    }
}

/// Scale ball speed by the destroyed block's impulse multiplier, capped
fn speed_up_ball(state: &mut GameState, color: GameColor, config: &GameConfig) {
    let factor = 1.0 + color.impulse_multiplier() * config.speedup_per_impulse;
    let vel = state.ball.vel * factor;
    state.ball.vel = vel.clamp_length_max(config.ball_max_speed);
}

/// Pick where under the paddle the autoplay pointer meets the ball next
fn reroll_autoplay_offset(state: &mut GameState) {
    let reach = state.paddle.body.rect.half_size().x * 0.6;
    state.autoplay_offset = if reach > 0.0 {
        state.rng.random_range(-reach..=reach)
    } else {
        0.0
    };
}
