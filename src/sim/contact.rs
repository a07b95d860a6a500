//! Contact resolution
//!
//! Maps a pair of touching bodies to the action the game should take. The
//! mapping is pure; `tick::apply_action` carries the side effects out.

use serde::{Deserialize, Serialize};

use super::state::Role;

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: u32,
    pub role: Role,
}

/// Two bodies started touching during a physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl ContactEvent {
    pub fn new(a: ContactBody, b: ContactBody) -> Self {
        Self { a, b }
    }

    /// The body on either side carrying `role`, if any
    pub fn body_with_role(&self, role: Role) -> Option<ContactBody> {
        if self.a.role == role {
            Some(self.a)
        } else if self.b.role == role {
            Some(self.b)
        } else {
            None
        }
    }
}

/// Classification of an unordered role pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    BallHitBlock,
    BallHitPaddle,
    Ignored,
}

/// What the game does in response to a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolverAction {
    /// Destroy the block, add one point, play the block cue
    RemoveBlockAndScore { block: u32 },
    /// Play the paddle cue
    PlayPaddleSound,
    NoOp,
}

/// Classify a role pair. Argument order does not matter.
pub fn resolve(a: Role, b: Role) -> ContactKind {
    use Role::*;
    match (a, b) {
        (Block, Ball) | (Ball, Block) => ContactKind::BallHitBlock,
        (Paddle, Ball) | (Ball, Paddle) => ContactKind::BallHitPaddle,
        _ => ContactKind::Ignored,
    }
}

/// Decide the action for a contact event
pub fn resolve_contact(contact: &ContactEvent) -> ResolverAction {
    match resolve(contact.a.role, contact.b.role) {
        ContactKind::BallHitBlock => match contact.body_with_role(Role::Block) {
            Some(block) => ResolverAction::RemoveBlockAndScore { block: block.id },
            None => ResolverAction::NoOp,
        },
        ContactKind::BallHitPaddle => ResolverAction::PlayPaddleSound,
        ContactKind::Ignored => ResolverAction::NoOp,
    }
}
