//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::color::GameColor;
use super::geometry::Rect;
use super::layout::generate_field;
use crate::config::GameConfig;

/// What an entity is, for collision dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Paddle,
    Ball,
    Block,
}

/// A rectangular body in the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub role: Role,
    pub color: GameColor,
    pub rect: Rect,
    pub vel: Vec2,
    /// Responds to forces (only the ball does)
    pub dynamic: bool,
}

impl Entity {
    /// A static (non-movable) body
    pub fn fixed(id: u32, role: Role, color: GameColor, rect: Rect) -> Self {
        Self {
            id,
            role,
            color,
            rect,
            vel: Vec2::ZERO,
            dynamic: false,
        }
    }

    /// Apply an instantaneous velocity change
    pub fn apply_impulse(&mut self, impulse: Vec2, impulse_to_speed: f32) {
        if self.dynamic {
            self.vel += impulse * impulse_to_speed;
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub body: Entity,
}

impl Paddle {
    /// Move the paddle's horizontal center to the pointer.
    ///
    /// Without `clamp` the paddle may hang past either field edge.
    pub fn follow_pointer(&mut self, x: f32, field: &Rect, clamp: bool) -> f32 {
        let x = if clamp {
            let half = self.body.rect.half_size().x;
            let (lo, hi) = (field.min().x + half, field.max().x - half);
            if lo <= hi { x.clamp(lo, hi) } else { field.center.x }
        } else {
            x
        };
        self.body.rect.center.x = x;
        x
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.body.rect.center.x
    }
}

/// Complete game state (deterministic)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Play field, origin at the bottom-left
    pub field: Rect,
    pub paddle: Paddle,
    pub ball: Entity,
    /// Remaining blocks (sorted by id for determinism)
    pub blocks: Vec<Entity>,
    /// Blocks destroyed so far; never decreases
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Horizontal offset the autoplay pointer keeps from the ball
    pub autoplay_offset: f32,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl GameState {
    /// Set up the field, paddle and ball, and launch the ball
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let field = Rect::from_min_size(Vec2::ZERO, config.field_size());

        let mut next_id = 1;
        let mut alloc = || {
            let id = next_id;
            next_id += 1;
            id
        };

        let paddle_size = Vec2::new(
            config.paddle_width_fraction * field.width(),
            config.paddle_height_fraction * field.height(),
        );
        let paddle = Paddle {
            body: Entity::fixed(
                alloc(),
                Role::Paddle,
                GameColor::Pink,
                Rect::new(
                    Vec2::new(field.width() / 2.0, config.paddle_y_fraction * field.height()),
                    paddle_size,
                ),
            ),
        };

        let mut ball = Entity {
            id: alloc(),
            role: Role::Ball,
            color: GameColor::Pink,
            rect: Rect::new(Vec2::from(config.ball_start), Vec2::splat(config.ball_size)),
            vel: Vec2::ZERO,
            dynamic: true,
        };
        ball.apply_impulse(Vec2::from(config.launch_impulse), config.impulse_to_speed);

        let blocks = generate_field(
            config.block_area(&field),
            &config.palette,
            config.blocks_per_row,
            &mut alloc,
        );

        log::info!(
            "Field {}x{} with {} blocks, seed {}",
            field.width(),
            field.height(),
            blocks.len(),
            seed
        );

        Self {
            seed,
            field,
            paddle,
            ball,
            blocks,
            score: 0,
            time_ticks: 0,
            autoplay_offset: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Remove a block by id, returning it if it was still present
    pub fn remove_block(&mut self, id: u32) -> Option<Entity> {
        let idx = self.blocks.iter().position(|b| b.id == id)?;
        Some(self.blocks.remove(idx))
    }

    /// True once every block has been destroyed
    pub fn is_cleared(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle_at(x: f32, width: f32) -> Paddle {
        Paddle {
            body: Entity::fixed(
                1,
                Role::Paddle,
                GameColor::Pink,
                Rect::new(Vec2::new(x, 20.0), Vec2::new(width, 5.0)),
            ),
        }
    }

    #[test]
    fn test_new_state_launches_ball() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 7);
        assert_eq!(state.score, 0);
        assert!(state.ball.dynamic);
        assert_eq!(state.ball.vel, Vec2::new(200.0, 300.0));
        assert!(!state.paddle.body.dynamic);
        assert_eq!(
            state.blocks.len(),
            config.palette.len() * config.blocks_per_row as usize
        );
    }

    #[test]
    fn test_entity_ids_unique() {
        let state = GameState::new(&GameConfig::default(), 1);
        let mut ids: Vec<u32> = state.blocks.iter().map(|b| b.id).collect();
        ids.push(state.ball.id);
        ids.push(state.paddle.body.id);
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    #[test]
    fn test_paddle_defaults_from_field() {
        let config = GameConfig::default();
        let state = GameState::new(&config, 1);
        let r = state.paddle.body.rect;
        assert!((r.width() - 0.2 * config.field_width).abs() < 1e-4);
        assert!((r.height() - 0.025 * config.field_height).abs() < 1e-4);
        assert!((r.center.x - config.field_width / 2.0).abs() < 1e-4);
        assert!((r.center.y - 0.2 * config.field_height).abs() < 1e-4);
    }

    #[test]
    fn test_static_bodies_ignore_impulse() {
        let mut p = paddle_at(50.0, 40.0);
        p.body.apply_impulse(Vec2::new(2.0, 3.0), 100.0);
        assert_eq!(p.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_follow_pointer_unclamped() {
        let field = Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 400.0));
        let mut p = paddle_at(100.0, 40.0);
        assert_eq!(p.follow_pointer(195.0, &field, false), 195.0);
        assert_eq!(p.x(), 195.0);
        assert_eq!(p.body.rect.center.y, 20.0);
    }

    #[test]
    fn test_follow_pointer_clamped() {
        let field = Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 400.0));
        let mut p = paddle_at(100.0, 40.0);
        assert_eq!(p.follow_pointer(195.0, &field, true), 180.0);
        assert_eq!(p.follow_pointer(-10.0, &field, true), 20.0);
        assert_eq!(p.follow_pointer(70.0, &field, true), 70.0);
    }

    #[test]
    fn test_remove_block_once() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        let id = state.blocks[3].id;
        let before = state.blocks.len();
        assert!(state.remove_block(id).is_some());
        assert!(state.remove_block(id).is_none());
        assert_eq!(state.blocks.len(), before - 1);
        // Removal keeps the remaining blocks in id order
        assert!(state.blocks.windows(2).all(|w| w[0].id < w[1].id));
    }
}
