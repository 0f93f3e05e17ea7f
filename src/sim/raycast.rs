//! Ray casting against static stage geometry
//!
//! Projectile steps are swept with a single ray per frame: origin at the
//! step start, direction along the normalized displacement. Triangles are
//! treated as double-sided; the barycentric coordinates of a hit also
//! interpolate the per-vertex UVs so the painter knows where on the
//! surface's raster to stamp.

use glam::{Vec2, Vec3};

/// Rejects rays parallel to a triangle and hits at the ray origin
const EPSILON: f32 = 1e-7;

/// A ray with normalized direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    /// `dir` must already be normalized; callers guard zero-length steps
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

/// A ray/triangle intersection
#[derive(Debug, Clone, Copy)]
pub struct TriangleHit {
    /// Distance along the ray to the intersection point
    pub distance: f32,
    /// Texture UV interpolated from the triangle's vertex UVs
    pub uv: Vec2,
}

/// Möller-Trumbore ray/triangle intersection, double-sided.
///
/// Returns the hit distance and the interpolated texture UV, or None when
/// the ray misses, runs parallel, or the triangle lies behind the origin.
pub fn intersect_triangle(
    ray: &Ray,
    positions: [Vec3; 3],
    uvs: [Vec2; 3],
) -> Option<TriangleHit> {
    let [p0, p1, p2] = positions;
    let edge1 = p1 - p0;
    let edge2 = p2 - p0;

    let pvec = ray.dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - p0;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = ray.dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let distance = edge2.dot(qvec) * inv_det;
    if distance <= EPSILON {
        return None;
    }

    let [uv0, uv1, uv2] = uvs;
    let uv = uv0 * (1.0 - u - v) + uv1 * u + uv2 * v;
    Some(TriangleHit { distance, uv })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> ([Vec3; 3], [Vec2; 3]) {
        (
            [
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        )
    }

    #[test]
    fn test_straight_down_hit() {
        let (tri, uvs) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 2.0, 0.25), Vec3::NEG_Y);
        let hit = intersect_triangle(&ray, tri, uvs).expect("should hit");
        assert!((hit.distance - 2.0).abs() < 1e-5);
        assert!((hit.uv.x - 0.25).abs() < 1e-5);
        assert!((hit.uv.y - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_hit_from_below_double_sided() {
        let (tri, uvs) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, -1.0, 0.25), Vec3::Y);
        assert!(intersect_triangle(&ray, tri, uvs).is_some());
    }

    #[test]
    fn test_miss_outside_triangle() {
        let (tri, uvs) = unit_triangle();
        // u + v > 1 on the far side of the hypotenuse
        let ray = Ray::new(Vec3::new(0.9, 2.0, 0.9), Vec3::NEG_Y);
        assert!(intersect_triangle(&ray, tri, uvs).is_none());
    }

    #[test]
    fn test_parallel_ray_misses() {
        let (tri, uvs) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 1.0, 0.25), Vec3::X);
        assert!(intersect_triangle(&ray, tri, uvs).is_none());
    }

    #[test]
    fn test_triangle_behind_origin_misses() {
        let (tri, uvs) = unit_triangle();
        let ray = Ray::new(Vec3::new(0.25, 2.0, 0.25), Vec3::Y);
        assert!(intersect_triangle(&ray, tri, uvs).is_none());
    }
}
