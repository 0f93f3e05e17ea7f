//! Projectile simulation
//!
//! Deterministic, frame-driven core:
//! - Plain synchronous calls from the host's frame callback
//! - Stable iteration order (index order, single compaction per frame)
//! - Seeded RNG for decal geometry
//! - No rendering or platform dependencies

pub mod raycast;
pub mod state;
pub mod surface;
pub mod tick;

pub use raycast::{Ray, TriangleHit, intersect_triangle};
pub use state::{CameraPose, Projectile, TickInput, WorldState};
pub use surface::{Aabb, Surface, SurfaceHit, SurfaceRole, TriangleMesh, nearest_hit};
pub use tick::{Impact, TickReport, advance_projectiles, move_camera, tick};
