//! Minimal rigid-body step for the ball
//!
//! The ball is the only dynamic body. Paddle and blocks are static boxes,
//! the field edges form a closed loop. Restitution is 1 and there is no
//! friction or gravity, so speed only changes when the game scales it.

use glam::Vec2;

use super::contact::{ContactBody, ContactEvent};
use super::geometry::Rect;
use super::state::Entity;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Keep the ball inside the field edge loop, bouncing off each side.
/// Returns true if any edge was hit.
pub fn bounce_off_bounds(ball: &mut Entity, bounds: &Rect) -> bool {
    let half = ball.rect.half_size();
    let min = bounds.min() + half;
    let max = bounds.max() - half;
    let pos = &mut ball.rect.center;
    let mut hit = false;

    if pos.x < min.x {
        pos.x = min.x;
        ball.vel.x = ball.vel.x.abs();
        hit = true;
    } else if pos.x > max.x {
        pos.x = max.x;
        ball.vel.x = -ball.vel.x.abs();
        hit = true;
    }

    if pos.y < min.y {
        pos.y = min.y;
        ball.vel.y = ball.vel.y.abs();
        hit = true;
    } else if pos.y > max.y {
        pos.y = max.y;
        ball.vel.y = -ball.vel.y.abs();
        hit = true;
    }

    hit
}

/// Push the ball out of a static body and reflect it if it was moving in.
/// Returns false if they do not overlap.
pub fn resolve_overlap(ball: &mut Entity, obstacle: &Rect) -> bool {
    let Some(sep) = ball.rect.separation_from(obstacle) else {
        return false;
    };
    ball.rect.center += sep.normal * sep.depth;
    if ball.vel.dot(sep.normal) < 0.0 {
        ball.vel = reflect_velocity(ball.vel, sep.normal);
    }
    true
}

/// Advance the ball by `dt` and report every body it touched.
///
/// Each obstacle appears at most once in the result, in the order given.
/// Contacts name the obstacle as `a` and the ball as `b`.
pub fn step(ball: &mut Entity, obstacles: &[&Entity], bounds: &Rect, dt: f32) -> Vec<ContactEvent> {
    ball.rect.center += ball.vel * dt;

    let ball_body = ContactBody {
        id: ball.id,
        role: ball.role,
    };

    // Everything the swept position touches counts, even if resolving an
    // earlier overlap moves the ball clear of a later one
    let touching: Vec<&Entity> = obstacles
        .iter()
        .copied()
        .filter(|o| o.id != ball.id && ball.rect.intersects(&o.rect))
        .collect();

    let mut contacts = Vec::with_capacity(touching.len());
    for obstacle in touching {
        resolve_overlap(ball, &obstacle.rect);
        contacts.push(ContactEvent::new(
            ContactBody {
                id: obstacle.id,
                role: obstacle.role,
            },
            ball_body,
        ));
    }

    bounce_off_bounds(ball, bounds);

    contacts
}
