//! Static stage geometry
//!
//! Stands in for the glTF stage asset: the same two named collidable nodes
//! the loader would hand over ("Plane" floor, "Cube" target), built
//! analytically. Each surface gets its paintable grid texture attached at
//! build time, exactly once per session.

use glam::{Vec2, Vec3};

use crate::sim::surface::{Aabb, Surface, SurfaceRole, TriangleMesh};

/// Floor half-extent in world units (the floor spans ±this in x and z)
pub const FLOOR_HALF_EXTENT: f32 = 10.0;
/// Cube edge length
pub const CUBE_SIZE: f32 = 2.0;

/// Build the collidable stage surfaces
///
/// Walks the stage's nodes the way the loader callback would and keeps
/// the ones whose names map to known surface roles.
pub fn build_stage() -> Vec<Surface> {
    let nodes = [("Plane", floor_mesh()), ("Cube", cube_mesh())];

    let mut surfaces = Vec::new();
    for (name, mesh) in nodes {
        if let Some(role) = SurfaceRole::from_node_name(name) {
            surfaces.push(Surface::new(name, role, mesh));
        }
    }

    log::info!(
        "Stage built: {} surfaces, {} triangles",
        surfaces.len(),
        surfaces.iter().map(|s| s.mesh.indices.len()).sum::<usize>()
    );
    surfaces
}

/// Combined bounds of every stage surface
pub fn stage_bounds(surfaces: &[Surface]) -> Option<Aabb> {
    surfaces
        .iter()
        .filter_map(|s| s.mesh.aabb())
        .reduce(Aabb::union)
}

/// Texture UV under a world point, if it lies over the floor
///
/// Matches the floor mesh's vertex UVs: u grows with +x, v shrinks with +z.
pub fn floor_uv(point: Vec3) -> Option<Vec2> {
    let e = FLOOR_HALF_EXTENT;
    if point.x.abs() > e || point.z.abs() > e {
        return None;
    }
    Some(Vec2::new(
        (point.x + e) / (2.0 * e),
        1.0 - (point.z + e) / (2.0 * e),
    ))
}

/// Flat square floor at y = 0, centered on the origin, UVs spanning [0,1]²
fn floor_mesh() -> TriangleMesh {
    let e = FLOOR_HALF_EXTENT;
    TriangleMesh {
        positions: vec![
            Vec3::new(-e, 0.0, -e),
            Vec3::new(e, 0.0, -e),
            Vec3::new(e, 0.0, e),
            Vec3::new(-e, 0.0, e),
        ],
        uvs: vec![
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ],
        indices: vec![[0, 1, 2], [0, 2, 3]],
    }
}

/// Axis-aligned cube resting on the floor, each face mapped to the full UV square
fn cube_mesh() -> TriangleMesh {
    let h = CUBE_SIZE / 2.0;
    let (bottom, top) = (0.0, CUBE_SIZE);

    let mut positions = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(12);

    // (corner order per face: the quad winds consistently, UVs cover [0,1]²)
    let faces: [[Vec3; 4]; 6] = [
        // +y (top)
        [
            Vec3::new(-h, top, -h),
            Vec3::new(h, top, -h),
            Vec3::new(h, top, h),
            Vec3::new(-h, top, h),
        ],
        // -y (bottom, flush with the floor)
        [
            Vec3::new(-h, bottom, h),
            Vec3::new(h, bottom, h),
            Vec3::new(h, bottom, -h),
            Vec3::new(-h, bottom, -h),
        ],
        // +x
        [
            Vec3::new(h, bottom, -h),
            Vec3::new(h, bottom, h),
            Vec3::new(h, top, h),
            Vec3::new(h, top, -h),
        ],
        // -x
        [
            Vec3::new(-h, bottom, h),
            Vec3::new(-h, bottom, -h),
            Vec3::new(-h, top, -h),
            Vec3::new(-h, top, h),
        ],
        // +z
        [
            Vec3::new(h, bottom, h),
            Vec3::new(-h, bottom, h),
            Vec3::new(-h, top, h),
            Vec3::new(h, top, h),
        ],
        // -z
        [
            Vec3::new(-h, bottom, -h),
            Vec3::new(h, bottom, -h),
            Vec3::new(h, top, -h),
            Vec3::new(-h, top, -h),
        ],
    ];

    let face_uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    for face in faces {
        let base = positions.len() as u32;
        positions.extend(face);
        uvs.extend(face_uvs);
        indices.push([base, base + 1, base + 2]);
        indices.push([base, base + 2, base + 3]);
    }

    TriangleMesh {
        positions,
        uvs,
        indices,
    }
}
