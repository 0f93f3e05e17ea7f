//! Impact decal stamping
//!
//! One impact paints a cluster of filled disks: a main disk at the hit
//! point, a ring of satellite splats scattered around it, and the odd
//! droplet thrown a little further out. Shapes are fully opaque, so later
//! impacts simply overwrite earlier ones.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::palette::Rgb;
use super::texture::PaintTexture;

/// Splat geometry tuning
///
/// The ranges describe a statistical envelope, not an exact layout; each
/// stamp draws fresh random disks inside it.
#[derive(Debug, Clone)]
pub struct SplatParams {
    /// Radius of the central disk (px at full texture resolution)
    pub main_radius: f32,
    /// Number of satellite splats per impact
    pub splat_count: u32,
    /// Extra distance satellites scatter beyond the main radius
    pub scatter: f32,
    /// Satellite radius = min + U(0, range)
    pub splat_radius_min: f32,
    pub splat_radius_range: f32,
    /// Chance each satellite throws an extra droplet
    pub droplet_chance: f64,
    /// Angular jitter applied to the droplet direction (radians, ± half)
    pub droplet_jitter: f32,
    /// Extra distance a droplet travels past its satellite
    pub droplet_reach: f32,
    /// Droplet radius = min + U(0, range)
    pub droplet_radius_min: f32,
    pub droplet_radius_range: f32,
}

impl Default for SplatParams {
    fn default() -> Self {
        Self {
            main_radius: 50.0,
            splat_count: 12,
            scatter: 50.0,
            splat_radius_min: 5.0,
            splat_radius_range: 15.0,
            droplet_chance: 0.5,
            droplet_jitter: 1.0,
            droplet_reach: 10.0,
            droplet_radius_min: 4.0,
            droplet_radius_range: 3.0,
        }
    }
}

impl SplatParams {
    /// Furthest any pixel of a stamp can land from its center
    pub fn max_reach(&self) -> f32 {
        let satellite = self.main_radius
            + self.scatter
            + self.splat_radius_min
            + self.splat_radius_range;
        let droplet = self.main_radius
            + self.scatter
            + self.droplet_reach
            + self.droplet_radius_min
            + self.droplet_radius_range;
        satellite.max(droplet)
    }
}

/// Stamp a decal with the default splat geometry
pub fn stamp(texture: &mut PaintTexture, uv: Vec2, color: Rgb, rng: &mut impl Rng) {
    stamp_with(texture, uv, color, &SplatParams::default(), rng);
}

/// Stamp a decal centered at the surface-local UV coordinate.
///
/// `uv` is in [0,1]²; v = 1 maps to raster row 0. Mutates only the given
/// texture raster and marks it dirty.
pub fn stamp_with(
    texture: &mut PaintTexture,
    uv: Vec2,
    color: Rgb,
    params: &SplatParams,
    rng: &mut impl Rng,
) {
    let size = texture.size() as f32;
    let cx = uv.x * size;
    let cy = (1.0 - uv.y) * size;

    texture.fill_disk(cx, cy, params.main_radius, color);

    for _ in 0..params.splat_count {
        let angle = rng.random_range(0.0..TAU);
        let distance = params.main_radius + rng.random_range(0.0..params.scatter);
        let splat_x = cx + angle.cos() * distance;
        let splat_y = cy + angle.sin() * distance;
        let radius = params.splat_radius_min + rng.random_range(0.0..params.splat_radius_range);
        texture.fill_disk(splat_x, splat_y, radius, color);

        if rng.random_bool(params.droplet_chance) {
            let jitter = rng.random_range(-params.droplet_jitter / 2.0..params.droplet_jitter / 2.0);
            let droplet_angle = angle + jitter;
            let droplet_distance = distance + rng.random_range(0.0..params.droplet_reach);
            let droplet_x = cx + droplet_angle.cos() * droplet_distance;
            let droplet_y = cy + droplet_angle.sin() * droplet_distance;
            let droplet_radius =
                params.droplet_radius_min + rng.random_range(0.0..params.droplet_radius_range);
            texture.fill_disk(droplet_x, droplet_y, droplet_radius, color);
        }
    }
}
