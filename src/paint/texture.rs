//! Paintable texture rasters
//!
//! Each collidable surface owns one square RGBA8 raster. The raster is
//! created once with a grid base pattern and only its pixel contents ever
//! change afterwards: decal stamps overwrite pixels, and a clear regenerates
//! the base pattern from scratch.

use crate::consts::PAINT_TEXTURE_SIZE;

use super::palette::{BACKGROUND, Rgb, blend_over_white};

/// Fine grid line count across the texture
const FINE_GRID_DIVISIONS: usize = 80;
/// Main grid line count across the texture
const MAIN_GRID_DIVISIONS: usize = 16;
/// Main grid line width in pixels
const MAIN_LINE_WIDTH: usize = 2;

/// Base pattern variant - same structure, different tint per surface role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    /// Blue-tinted grid for the floor
    Floor,
    /// Orange-tinted grid for the cube
    Cube,
}

impl GridStyle {
    /// Fine grid line color (pre-blended over the white background)
    fn fine_color(self) -> Rgb {
        match self {
            GridStyle::Floor => blend_over_white(Rgb::new(74, 144, 226), 0.3),
            GridStyle::Cube => blend_over_white(Rgb::new(255, 165, 0), 0.2),
        }
    }

    /// Main grid line color (pre-blended over the white background)
    fn main_color(self) -> Rgb {
        match self {
            GridStyle::Floor => blend_over_white(Rgb::new(74, 144, 226), 0.9),
            GridStyle::Cube => blend_over_white(Rgb::new(255, 140, 0), 0.8),
        }
    }
}

/// A square RGBA8 paint raster
///
/// Dimensions never change after creation; only pixel contents do.
#[derive(Debug, Clone)]
pub struct PaintTexture {
    size: usize,
    pixels: Vec<u8>,
    style: GridStyle,
    dirty: bool,
}

impl PaintTexture {
    /// Create a full-resolution texture with the base grid pattern
    pub fn new(style: GridStyle) -> Self {
        Self::with_size(style, PAINT_TEXTURE_SIZE)
    }

    /// Create a texture at a custom resolution (tests use small rasters)
    pub fn with_size(style: GridStyle, size: usize) -> Self {
        let mut texture = Self {
            size,
            pixels: vec![0; size * size * 4],
            style,
            dirty: false,
        };
        texture.paint_base();
        texture.dirty = true;
        texture
    }

    /// Edge length in pixels
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Raw RGBA8 pixel data, row-major from the top-left
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Read one pixel
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.size + x) * 4;
        Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2])
    }

    #[inline]
    fn put(&mut self, x: usize, y: usize, color: Rgb) {
        let i = (y * self.size + x) * 4;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = 255;
    }

    /// Whether the raster changed since the last upload
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag, returning whether an upload is needed
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Fill a solid disk, clamped at the raster edges
    pub fn fill_disk(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        if radius <= 0.0 {
            return;
        }
        let size = self.size as i64;
        let y_min = ((cy - radius).floor() as i64).max(0);
        let y_max = ((cy + radius).ceil() as i64).min(size - 1);
        for y in y_min..=y_max {
            let dy = y as f32 + 0.5 - cy;
            let span_sq = radius * radius - dy * dy;
            if span_sq <= 0.0 {
                continue;
            }
            let span = span_sq.sqrt();
            let x_min = ((cx - span).floor() as i64).max(0);
            let x_max = ((cx + span).ceil() as i64).min(size - 1);
            for x in x_min..=x_max {
                let dx = x as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= radius * radius {
                    self.put(x as usize, y as usize, color);
                }
            }
        }
        self.dirty = true;
    }

    /// Regenerate the base grid, discarding every decal
    pub fn reset(&mut self) {
        self.paint_base();
        self.dirty = true;
    }

    fn paint_base(&mut self) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = BACKGROUND.r;
            px[1] = BACKGROUND.g;
            px[2] = BACKGROUND.b;
            px[3] = 255;
        }

        let fine = self.style.fine_color();
        for i in 0..=FINE_GRID_DIVISIONS {
            let at = (i * self.size / FINE_GRID_DIVISIONS).min(self.size - 1);
            self.fill_cols(at, 1, fine);
            self.fill_rows(at, 1, fine);
        }

        let main = self.style.main_color();
        for i in 0..=MAIN_GRID_DIVISIONS {
            let at = (i * self.size / MAIN_GRID_DIVISIONS)
                .min(self.size.saturating_sub(MAIN_LINE_WIDTH));
            self.fill_cols(at, MAIN_LINE_WIDTH, main);
            self.fill_rows(at, MAIN_LINE_WIDTH, main);
        }
    }

    fn fill_cols(&mut self, x: usize, width: usize, color: Rgb) {
        for x in x..(x + width).min(self.size) {
            for y in 0..self.size {
                self.put(x, y, color);
            }
        }
    }

    fn fill_rows(&mut self, y: usize, height: usize, color: Rgb) {
        for y in y..(y + height).min(self.size) {
            for x in 0..self.size {
                self.put(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 160 keeps both grid steps integral: fine every 2 px, main every 10 px
    const TEST_SIZE: usize = 160;

    #[test]
    fn test_base_pattern_has_background_and_grid() {
        let tex = PaintTexture::with_size(GridStyle::Floor, TEST_SIZE);
        // Cell interior stays white (odd coordinates miss the fine grid,
        // main lines cover x/y in {0, 1, 10, 11, 20, 21, ...})
        assert_eq!(tex.pixel(5, 5), BACKGROUND);
        // Fine line down x = 2
        assert_eq!(tex.pixel(2, 5), GridStyle::Floor.fine_color());
        // Main line down x = 0 overwrites the fine line along its full height
        assert_eq!(tex.pixel(0, 7), GridStyle::Floor.main_color());
    }

    #[test]
    fn test_styles_differ_only_in_tint() {
        let floor = PaintTexture::with_size(GridStyle::Floor, TEST_SIZE);
        let cube = PaintTexture::with_size(GridStyle::Cube, TEST_SIZE);
        assert_eq!(floor.size(), cube.size());
        assert_eq!(floor.pixel(5, 5), cube.pixel(5, 5));
        assert_ne!(floor.pixel(2, 5), cube.pixel(2, 5));
    }

    #[test]
    fn test_fill_disk_center_and_clamp() {
        let mut tex = PaintTexture::with_size(GridStyle::Floor, TEST_SIZE);
        let ink = Rgb::new(255, 60, 0);
        tex.fill_disk(80.0, 80.0, 5.0, ink);
        assert_eq!(tex.pixel(80, 80), ink);
        // Far cell interior untouched
        assert_eq!(tex.pixel(5, 5), BACKGROUND);

        // A disk centered off-raster must clamp, not panic
        tex.fill_disk(-3.0, 80.0, 6.0, ink);
        assert_eq!(tex.pixel(0, 80), ink);
    }

    #[test]
    fn test_reset_discards_decals() {
        let mut tex = PaintTexture::with_size(GridStyle::Cube, TEST_SIZE);
        let ink = Rgb::new(40, 110, 255);
        tex.fill_disk(40.0, 40.0, 8.0, ink);
        assert_eq!(tex.pixel(40, 40), ink);

        tex.reset();
        let fresh = PaintTexture::with_size(GridStyle::Cube, TEST_SIZE);
        assert_eq!(tex.data(), fresh.data());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut tex = PaintTexture::with_size(GridStyle::Floor, 32);
        assert!(tex.take_dirty());
        assert!(!tex.is_dirty());
        tex.fill_disk(16.0, 16.0, 4.0, Rgb::new(255, 60, 0));
        assert!(tex.take_dirty());
        assert!(!tex.take_dirty());
    }
}
