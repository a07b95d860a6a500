//! Breakdown - a minimal Breakout arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (layout, physics, contacts, game state)
//! - `audio`: Sound cues with failure isolation
//! - `config`: Data-driven game configuration

pub mod audio;
pub mod config;
pub mod sim;

pub use audio::{AudioBackend, AudioCueUnavailable, AudioManager, SoundEffect};
pub use config::{AudioSettings, ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default play field (portrait phone screen, in points)
    pub const FIELD_WIDTH: f32 = 375.0;
    pub const FIELD_HEIGHT: f32 = 667.0;

    /// Block field
    pub const BLOCKS_PER_ROW: u32 = 20;
    /// Bottom edge of the block field as a fraction of field height
    pub const BAND_ORIGIN_FRACTION: f32 = 0.6;
    /// Total height of all bands as a fraction of field height
    pub const BAND_HEIGHT_FRACTION: f32 = 0.15;

    /// Paddle defaults (fractions of the field)
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.2;
    pub const PADDLE_HEIGHT_FRACTION: f32 = 0.025;
    pub const PADDLE_Y_FRACTION: f32 = 0.2;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_START: [f32; 2] = [200.0, 200.0];
    /// Impulse applied to the ball at launch
    pub const LAUNCH_IMPULSE: [f32; 2] = [2.0, 3.0];
    /// Field units per second gained per unit of impulse
    pub const IMPULSE_TO_SPEED: f32 = 100.0;
    /// Maximum ball speed
    pub const BALL_MAX_SPEED: f32 = 900.0;
    /// Speed gain per destroyed block, per unit of the block color's impulse multiplier
    pub const SPEEDUP_PER_IMPULSE: f32 = 0.01;
}
