//! Paint coverage analysis
//!
//! A full-raster scan that buckets every pixel by exact RGB match against
//! the known palette. Expensive at full resolution (~4.2M pixels), so it
//! only runs on explicit triggers - never once per frame.

use super::palette::{BACKGROUND, PaintColor};
use super::texture::PaintTexture;

/// Pixel tally for one texture, derived on demand
///
/// Grid-line pixels match no palette entry; they count toward the total but
/// no bucket, so percentages need not sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    total: usize,
    background: usize,
    paint: [usize; PaintColor::ALL.len()],
}

impl Coverage {
    /// Exact covered fraction for one ink color, in [0, 1]
    pub fn fraction(&self, color: PaintColor) -> f64 {
        self.paint[color as usize] as f64 / self.total as f64
    }

    /// Covered percentage for one ink color, in [0, 100]
    ///
    /// Exact value; rounding to one decimal is the display layer's job.
    pub fn percent(&self, color: PaintColor) -> f64 {
        self.fraction(color) * 100.0
    }

    /// Fraction of pixels still showing the plain background
    pub fn background_fraction(&self) -> f64 {
        self.background as f64 / self.total as f64
    }

    /// Fraction covered by any ink color
    pub fn painted_fraction(&self) -> f64 {
        self.paint.iter().sum::<usize>() as f64 / self.total as f64
    }

    /// Raw pixel count for one ink color
    pub fn count(&self, color: PaintColor) -> usize {
        self.paint[color as usize]
    }

    /// Total pixels scanned (the percentage denominator)
    pub fn total_pixels(&self) -> usize {
        self.total
    }
}

/// Scan every pixel of the texture and tally palette matches
pub fn analyze(texture: &PaintTexture) -> Coverage {
    let mut coverage = Coverage {
        total: texture.size() * texture.size(),
        background: 0,
        paint: [0; PaintColor::ALL.len()],
    };

    let palette: [_; PaintColor::ALL.len()] = PaintColor::ALL.map(|c| c.rgb());

    for px in texture.data().chunks_exact(4) {
        let (r, g, b) = (px[0], px[1], px[2]);
        if r == BACKGROUND.r && g == BACKGROUND.g && b == BACKGROUND.b {
            coverage.background += 1;
            continue;
        }
        for (bucket, ink) in coverage.paint.iter_mut().zip(&palette) {
            if r == ink.r && g == ink.g && b == ink.b {
                *bucket += 1;
                break;
            }
        }
    }

    coverage
}
