//! Collidable surfaces
//!
//! A surface is a static triangle mesh with per-vertex UVs, a role derived
//! from its stage node name, and the mutable paint raster impacts draw on.
//! Meshes never change after stage build; only the raster does.

use glam::{Vec2, Vec3};

use crate::paint::{GridStyle, PaintTexture};

use super::raycast::{Ray, TriangleHit, intersect_triangle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing all points; None for an empty set
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self { min: first, max: first };
        for p in iter {
            aabb.min = aabb.min.min(p);
            aabb.max = aabb.max.max(p);
        }
        Some(aabb)
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Which painter behavior a surface gets, selected by stage node name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    Floor,
    Cube,
}

impl SurfaceRole {
    /// Map a stage node name to a known surface role
    pub fn from_node_name(name: &str) -> Option<Self> {
        match name {
            "Plane" => Some(SurfaceRole::Floor),
            "Cube" => Some(SurfaceRole::Cube),
            _ => None,
        }
    }

    /// Base pattern variant for this role's paint texture
    pub fn grid_style(self) -> GridStyle {
        match self {
            SurfaceRole::Floor => GridStyle::Floor,
            SurfaceRole::Cube => GridStyle::Cube,
        }
    }
}

/// An indexed triangle mesh with per-vertex texture UVs
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Iterate triangles as (positions, uvs) triples
    pub fn triangles(&self) -> impl Iterator<Item = ([Vec3; 3], [Vec2; 3])> + '_ {
        self.indices.iter().map(|&[a, b, c]| {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            (
                [self.positions[a], self.positions[b], self.positions[c]],
                [self.uvs[a], self.uvs[b], self.uvs[c]],
            )
        })
    }

    pub fn aabb(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }
}

/// A static stage mesh that projectiles can strike
#[derive(Debug, Clone)]
pub struct Surface {
    /// Stage node name ("Plane", "Cube")
    pub name: String,
    pub role: SurfaceRole,
    pub mesh: TriangleMesh,
    /// Accumulated paint; the only mutable part of a surface
    pub paint: PaintTexture,
}

impl Surface {
    pub fn new(name: impl Into<String>, role: SurfaceRole, mesh: TriangleMesh) -> Self {
        Self {
            name: name.into(),
            role,
            mesh,
            paint: PaintTexture::new(role.grid_style()),
        }
    }

    /// Nearest ray intersection with this surface's triangles
    pub fn intersect(&self, ray: &Ray) -> Option<TriangleHit> {
        let mut nearest: Option<TriangleHit> = None;
        for (positions, uvs) in self.mesh.triangles() {
            if let Some(hit) = intersect_triangle(ray, positions, uvs) {
                if nearest.map_or(true, |n| hit.distance < n.distance) {
                    nearest = Some(hit);
                }
            }
        }
        nearest
    }

    /// Replace the paint raster with a fresh base pattern
    pub fn reset_paint(&mut self) {
        self.paint.reset();
    }
}

/// Nearest intersection across a set of surfaces
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    /// Index of the struck surface in the queried slice
    pub surface: usize,
    pub distance: f32,
    /// Local texture UV at the hit point
    pub uv: Vec2,
}

/// Cast a ray against every surface and keep the nearest hit, if any
pub fn nearest_hit(ray: &Ray, surfaces: &[Surface]) -> Option<SurfaceHit> {
    let mut nearest: Option<SurfaceHit> = None;
    for (index, surface) in surfaces.iter().enumerate() {
        if let Some(hit) = surface.intersect(ray) {
            if nearest.map_or(true, |n| hit.distance < n.distance) {
                nearest = Some(SurfaceHit {
                    surface: index,
                    distance: hit.distance,
                    uv: hit.uv,
                });
            }
        }
    }
    nearest
}
