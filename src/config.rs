//! Game configuration
//!
//! Everything tunable about a session: field size, block layout, paddle and
//! ball geometry, launch and speed-up behavior, and audio preferences. Loaded
//! from JSON; any missing key falls back to its default.

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::color::{DEFAULT_PALETTE, GameColor};
use crate::sim::geometry::Rect;

/// Audio preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Directory (or URL prefix on the web) holding the cue files
    pub asset_dir: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            asset_dir: "assets".to_string(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Blocks ===
    /// Band colors, lowest band first
    pub palette: Vec<GameColor>,
    pub blocks_per_row: u32,
    /// Bottom of the block area as a fraction of field height
    pub band_origin_fraction: f32,
    /// Height of the block area as a fraction of field height
    pub band_height_fraction: f32,

    // === Paddle ===
    pub paddle_width_fraction: f32,
    pub paddle_height_fraction: f32,
    pub paddle_y_fraction: f32,
    /// Keep the paddle fully inside the field
    pub clamp_paddle: bool,

    // === Ball ===
    pub ball_size: f32,
    pub ball_start: [f32; 2],
    pub launch_impulse: [f32; 2],
    pub impulse_to_speed: f32,
    pub ball_max_speed: f32,
    /// Ball speed gain per destroyed block, scaled by the block color's
    /// impulse multiplier. Zero keeps the ball at launch speed.
    pub speedup_per_impulse: f32,

    // === Host ===
    /// Seed for the autoplay RNG; the host picks one when absent
    pub seed: Option<u64>,
    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            palette: DEFAULT_PALETTE.to_vec(),
            blocks_per_row: BLOCKS_PER_ROW,
            band_origin_fraction: BAND_ORIGIN_FRACTION,
            band_height_fraction: BAND_HEIGHT_FRACTION,

            paddle_width_fraction: PADDLE_WIDTH_FRACTION,
            paddle_height_fraction: PADDLE_HEIGHT_FRACTION,
            paddle_y_fraction: PADDLE_Y_FRACTION,
            clamp_paddle: false,

            ball_size: BALL_SIZE,
            ball_start: BALL_START,
            launch_impulse: LAUNCH_IMPULSE,
            impulse_to_speed: IMPULSE_TO_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            speedup_per_impulse: SPEEDUP_PER_IMPULSE,

            seed: None,
            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Same config with a different field size (the web shell sizes the
    /// field to the canvas)
    pub fn with_field_size(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Move the ball start to the field center when the ball would not fit
    /// at the configured one (a canvas smaller than the default field)
    pub fn fit_ball_start(mut self) -> Self {
        if !self.ball_fits_at_start() {
            self.ball_start = [self.field_width * 0.5, self.field_height * 0.5];
        }
        self
    }

    fn ball_fits_at_start(&self) -> bool {
        let half = self.ball_size * 0.5;
        let [x, y] = self.ball_start;
        (half..=self.field_width - half).contains(&x)
            && (half..=self.field_height - half).contains(&y)
    }

    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// The sub-rectangle of `field` that the block bands fill
    pub fn block_area(&self, field: &Rect) -> Rect {
        let min = field.min();
        Rect::from_min_size(
            Vec2::new(min.x, min.y + field.height() * self.band_origin_fraction),
            Vec2::new(field.width(), field.height() * self.band_height_fraction),
        )
    }

    /// Reject configs the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be positive, got {v}")))
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("band_height_fraction", self.band_height_fraction)?;
        positive("paddle_width_fraction", self.paddle_width_fraction)?;
        positive("paddle_height_fraction", self.paddle_height_fraction)?;
        positive("ball_size", self.ball_size)?;
        positive("ball_max_speed", self.ball_max_speed)?;

        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        if self.blocks_per_row == 0 {
            return Err(ConfigError::Invalid("blocks_per_row must be at least 1".into()));
        }
        if self.band_origin_fraction < 0.0
            || self.band_origin_fraction + self.band_height_fraction > 1.0
        {
            return Err(ConfigError::Invalid(
                "block area must lie inside the field".into(),
            ));
        }
        if self.speedup_per_impulse < 0.0 {
            return Err(ConfigError::Invalid("speedup_per_impulse must not be negative".into()));
        }
        if !(self.impulse_to_speed.is_finite() && self.impulse_to_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "impulse_to_speed must not be negative, got {}",
                self.impulse_to_speed
            )));
        }
        if self.paddle_width_fraction > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "paddle_width_fraction must be at most 1, got {}",
                self.paddle_width_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.paddle_y_fraction) {
            return Err(ConfigError::Invalid(format!(
                "paddle_y_fraction must be within 0..=1, got {}",
                self.paddle_y_fraction
            )));
        }
        if self.ball_size > self.field_width || self.ball_size > self.field_height {
            return Err(ConfigError::Invalid(format!(
                "ball_size {} does not fit a {}x{} field",
                self.ball_size, self.field_width, self.field_height
            )));
        }
        if !self.ball_fits_at_start() {
            return Err(ConfigError::Invalid(format!(
                "ball_start {:?} puts the ball outside the field",
                self.ball_start
            )));
        }
        Ok(())
    }
}

/// Why a config could not be loaded
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config: {e}"),
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.blocks_per_row, 20);
        assert_eq!(config.band_height_fraction, 0.15);
        assert_eq!(config.launch_impulse, [2.0, 3.0]);
        assert!(!config.clamp_paddle);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(
            r#"{ "field_width": 400, "palette": ["red", "pink"], "audio": { "muted": true } }"#,
        )
        .unwrap();
        assert_eq!(config.field_width, 400.0);
        assert_eq!(config.palette, vec![GameColor::Red, GameColor::Pink]);
        assert!(config.audio.muted);
        assert_eq!(config.audio.asset_dir, "assets");
        assert_eq!(config.blocks_per_row, 20);
    }

    #[test]
    fn test_rejects_empty_palette() {
        let err = GameConfig::from_json(r#"{ "palette": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_blocks() {
        let err = GameConfig::from_json(r#"{ "blocks_per_row": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_block_area_outside_field() {
        let err = GameConfig::from_json(r#"{ "band_origin_fraction": 0.9 }"#).unwrap_err();
        assert!(err.to_string().contains("inside the field"));
    }

    #[test]
    fn test_rejects_ball_larger_than_field() {
        let err = GameConfig::from_json(r#"{ "ball_size": 500 }"#).unwrap_err();
        assert!(err.to_string().contains("ball_size"));
    }

    #[test]
    fn test_rejects_paddle_wider_than_field() {
        let err = GameConfig::from_json(r#"{ "paddle_width_fraction": 3.0 }"#).unwrap_err();
        assert!(err.to_string().contains("paddle_width_fraction"));
        assert!(GameConfig::from_json(r#"{ "paddle_width_fraction": 1.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_paddle_off_field() {
        let err = GameConfig::from_json(r#"{ "paddle_y_fraction": -2.0 }"#).unwrap_err();
        assert!(err.to_string().contains("paddle_y_fraction"));
        let err = GameConfig::from_json(r#"{ "paddle_y_fraction": 1.5 }"#).unwrap_err();
        assert!(err.to_string().contains("paddle_y_fraction"));
    }

    #[test]
    fn test_rejects_ball_start_outside_field() {
        let err = GameConfig::from_json(r#"{ "ball_start": [-50, 200] }"#).unwrap_err();
        assert!(err.to_string().contains("ball_start"));
        // Center inside, but the ball hangs over the top edge
        let err = GameConfig::from_json(r#"{ "ball_start": [200, 664] }"#).unwrap_err();
        assert!(err.to_string().contains("ball_start"));
    }

    #[test]
    fn test_rejects_negative_impulse_to_speed() {
        let err = GameConfig::from_json(r#"{ "impulse_to_speed": -1 }"#).unwrap_err();
        assert!(err.to_string().contains("impulse_to_speed"));
        assert!(GameConfig::from_json(r#"{ "impulse_to_speed": 0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_oversized_ball_and_misplaced_paddle_together() {
        let err = GameConfig::from_json(
            r#"{ "ball_size": 500, "paddle_width_fraction": 3.0, "paddle_y_fraction": -2.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_fit_ball_start_on_small_canvas() {
        let config = GameConfig::default().with_field_size(150.0, 120.0);
        assert!(config.validate().is_err());

        let config = config.fit_ball_start();
        assert_eq!(config.ball_start, [75.0, 60.0]);
        assert!(config.validate().is_ok());

        // A start that already fits is kept
        let config = GameConfig::default().fit_ball_start();
        assert_eq!(config.ball_start, BALL_START);
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_block_area() {
        let config = GameConfig::default().with_field_size(400.0, 1000.0);
        let field = Rect::from_min_size(Vec2::ZERO, config.field_size());
        let area = config.block_area(&field);
        assert!((area.min().y - 600.0).abs() < 1e-3);
        assert!((area.height() - 150.0).abs() < 1e-3);
        assert_eq!(area.width(), 400.0);
    }
}
