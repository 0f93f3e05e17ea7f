//! Paint system: textures, decals, coverage
//!
//! Pure raster mutation with no simulator or camera coupling:
//! - `palette`: the fixed set of colors ever written to a raster
//! - `texture`: square RGBA8 rasters with the grid base pattern
//! - `splat`: procedural impact decal stamping
//! - `coverage`: on-demand full-raster color tally

pub mod coverage;
pub mod palette;
pub mod splat;
pub mod texture;

pub use coverage::{Coverage, analyze};
pub use palette::{BACKGROUND, PaintColor, Rgb};
pub use splat::{SplatParams, stamp, stamp_with};
pub use texture::{GridStyle, PaintTexture};
