//! World state and core simulation types

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::paint::PaintColor;

use super::surface::{Surface, SurfaceRole};

/// An in-flight paint projectile
///
/// Owned exclusively by the world's live set; removed on impact or when it
/// falls past the deletion height. Projectiles never interact with each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec3,
    pub vel: Vec3,
}

/// First-person camera pose
///
/// Yaw 0 looks along +x; pitch is positive upward. The view layer orbits
/// this pose; the simulator only reads it for spawn point and direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraPose {
    pub pos: Vec3,
    /// Heading around the y axis (radians)
    pub yaw: f32,
    /// Elevation angle (radians)
    pub pitch: f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            // Behind the stage center at eye height, facing -z, aiming
            // slightly down so a straight shot lands on the floor
            pos: Vec3::new(0.0, EYE_HEIGHT, 8.0),
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: -0.12,
        }
    }
}

impl CameraPose {
    /// Full view direction (unit length)
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// View direction flattened onto the ground plane (unit length)
    pub fn flat_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Strafe direction (unit length, to the right of the flat forward)
    pub fn right(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, self.yaw.cos())
    }
}

/// Input flags for a single tick
///
/// Movement flags are level-triggered (held key = set every frame); `fire`
/// and `clear_paint` are edge-triggered one-shots the driver clears after
/// each processed tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Spawn one projectile this tick
    pub fire: bool,
    /// Reset every surface's paint texture this tick
    pub clear_paint: bool,
}

/// Complete game world
///
/// Owns the live projectile set, the collidable surfaces, and the RNG the
/// decal painter draws from.
pub struct WorldState {
    pub camera: CameraPose,
    pub projectiles: Vec<Projectile>,
    /// Empty until the stage is installed; the simulator behaves correctly
    /// with no surfaces (nothing to hit, projectiles fall and are pruned)
    pub surfaces: Vec<Surface>,
    /// Active ink, published by the color selection UI
    pub selected_color: PaintColor,
    pub rng: Pcg32,
}

impl WorldState {
    pub fn new(seed: u64) -> Self {
        Self {
            camera: CameraPose::default(),
            projectiles: Vec::new(),
            surfaces: Vec::new(),
            selected_color: PaintColor::default(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Attach the loaded stage surfaces
    pub fn install_surfaces(&mut self, surfaces: Vec<Surface>) {
        self.surfaces = surfaces;
    }

    /// Spawn one projectile from the viewer's eye point
    ///
    /// Slightly below and in front of the eye, launched along the current
    /// view direction at the fixed launch speed. Always succeeds.
    pub fn fire(&mut self) {
        let forward = self.camera.forward();
        let mut pos = self.camera.pos;
        pos.y -= SPAWN_DROP;
        pos += forward * SPAWN_FORWARD;
        self.projectiles.push(Projectile {
            pos,
            vel: forward * LAUNCH_SPEED,
        });
    }

    /// Reset every surface's paint texture to its base pattern
    pub fn clear_paint(&mut self) {
        for surface in &mut self.surfaces {
            surface.reset_paint();
        }
        log::info!("All paint cleared");
    }

    /// First surface with the given role, if the stage is installed
    pub fn surface_by_role(&self, role: SurfaceRole) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.role == role)
    }
}
