//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod color;
pub mod contact;
pub mod geometry;
pub mod layout;
pub mod physics;
pub mod state;
pub mod tick;

pub use color::{DEFAULT_PALETTE, GameColor};
pub use contact::{ContactBody, ContactEvent, ContactKind, ResolverAction, resolve, resolve_contact};
pub use geometry::Rect;
pub use layout::{band_rects, generate_field};
pub use physics::step;
pub use state::{Entity, GameState, Paddle, Role};
pub use tick::{GameEvent, TickInput, apply_action, tick};
