//! Block palette
//!
//! Each color carries a display color and an impulse multiplier. The
//! multiplier drives how much a destroyed block speeds up the ball.

use serde::{Deserialize, Serialize};

/// The fixed seven-color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameColor {
    Purple,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Pink,
}

/// Default block field, lowest band first
pub const DEFAULT_PALETTE: [GameColor; 6] = [
    GameColor::Blue,
    GameColor::Green,
    GameColor::Yellow,
    GameColor::Orange,
    GameColor::Red,
    GameColor::Purple,
];

impl GameColor {
    pub const ALL: [GameColor; 7] = [
        GameColor::Purple,
        GameColor::Red,
        GameColor::Orange,
        GameColor::Yellow,
        GameColor::Green,
        GameColor::Blue,
        GameColor::Pink,
    ];

    /// Display color as RGBA in 0..=1
    pub fn rgba(self) -> [f32; 4] {
        match self {
            GameColor::Purple => [0.82, 0.18, 0.83, 1.0],
            GameColor::Red => [0.98, 0.32, 0.30, 1.0],
            GameColor::Orange => [1.00, 0.50, 0.00, 1.0],
            GameColor::Yellow => [1.00, 0.56, 0.00, 1.0],
            GameColor::Green => [0.00, 0.71, 0.02, 1.0],
            GameColor::Blue => [0.42, 0.37, 0.98, 1.0],
            GameColor::Pink => [0.81, 0.20, 0.80, 1.0],
        }
    }

    /// CSS color string, e.g. `rgb(209,46,212)`
    pub fn css(self) -> String {
        let [r, g, b, _] = self.rgba();
        format!(
            "rgb({},{},{})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8
        )
    }

    /// Ball speed-up weight when a block of this color is destroyed.
    /// Upper bands weigh more.
    pub fn impulse_multiplier(self) -> f32 {
        match self {
            GameColor::Purple => 4.0,
            GameColor::Red => 3.5,
            GameColor::Orange => 3.0,
            GameColor::Yellow => 2.5,
            GameColor::Green => 2.0,
            GameColor::Blue => 1.5,
            GameColor::Pink => 1.0,
        }
    }
}
