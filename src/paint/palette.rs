//! Paint palette and raster pixel colors
//!
//! Every pixel the game ever writes is one of a small fixed set of opaque
//! colors, which is what lets the coverage analyzer classify by exact match.

use serde::{Deserialize, Serialize};

/// An opaque RGB color as stored in the paint raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string for canvas/DOM glue
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Base color of every paint texture before any decals land
pub const BACKGROUND: Rgb = Rgb::new(255, 255, 255);

/// Ink colors the player can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaintColor {
    #[default]
    Orange,
    Blue,
    Green,
    Yellow,
}

impl PaintColor {
    /// All selectable colors, in UI order
    pub const ALL: [PaintColor; 4] = [
        PaintColor::Orange,
        PaintColor::Blue,
        PaintColor::Green,
        PaintColor::Yellow,
    ];

    /// Raster color stamped by impacts of this ink
    pub fn rgb(self) -> Rgb {
        match self {
            PaintColor::Orange => Rgb::new(255, 60, 0),
            PaintColor::Blue => Rgb::new(40, 110, 255),
            PaintColor::Green => Rgb::new(70, 200, 60),
            PaintColor::Yellow => Rgb::new(250, 210, 40),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaintColor::Orange => "Orange",
            PaintColor::Blue => "Blue",
            PaintColor::Green => "Green",
            PaintColor::Yellow => "Yellow",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "orange" => Some(PaintColor::Orange),
            "blue" => Some(PaintColor::Blue),
            "green" => Some(PaintColor::Green),
            "yellow" => Some(PaintColor::Yellow),
            _ => None,
        }
    }
}

/// Composite a tint over the white background at the given opacity.
///
/// Grid lines are authored as translucent strokes; the raster stores only
/// opaque pixels, so the blend happens once here instead of per-frame.
pub fn blend_over_white(tint: Rgb, alpha: f32) -> Rgb {
    let blend = |c: u8| -> u8 {
        let v = c as f32 * alpha + 255.0 * (1.0 - alpha);
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgb::new(blend(tint.r), blend(tint.g), blend(tint.b))
}
