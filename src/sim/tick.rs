//! Per-frame simulation step
//!
//! Strict per-tick order: clear request (raster replacement happens before
//! any paint lands this frame) → camera movement → fire spawn → projectile
//! advance → impact painting. One pass, no queues, no locking - everything
//! runs on the host's frame callback.

use glam::{Vec2, Vec3};

use crate::consts::*;
use crate::paint;

use super::raycast::Ray;
use super::state::{CameraPose, Projectile, TickInput, WorldState};
use super::surface::{Surface, nearest_hit};

/// One projectile/surface collision, in the struck surface's local UV space
#[derive(Debug, Clone, Copy)]
pub struct Impact {
    /// Index into the world's surface set
    pub surface: usize,
    pub uv: Vec2,
}

/// What a tick did, for the driver's HUD/minimap decisions
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub impacts: Vec<Impact>,
    /// A clear ran this tick; the overhead view needs a forced redraw
    pub cleared: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) -> TickReport {
    let cleared = input.clear_paint;
    if cleared {
        world.clear_paint();
    }

    move_camera(&mut world.camera, input, dt);

    if input.fire {
        world.fire();
    }

    let impacts = advance_projectiles(&mut world.projectiles, dt, &world.surfaces);

    let color = world.selected_color.rgb();
    for impact in &impacts {
        let surface = &mut world.surfaces[impact.surface];
        paint::stamp(&mut surface.paint, impact.uv, color, &mut world.rng);
        log::debug!(
            "Impact on {} at uv ({:.3}, {:.3})",
            surface.name,
            impact.uv.x,
            impact.uv.y
        );
    }

    TickReport { impacts, cleared }
}

/// Walk the camera along its flattened forward/right directions
pub fn move_camera(camera: &mut CameraPose, input: &TickInput, dt: f32) {
    let forward = camera.flat_forward();
    let right = camera.right();

    let mut direction = Vec3::ZERO;
    if input.move_forward {
        direction += forward;
    }
    if input.move_back {
        direction -= forward;
    }
    if input.move_left {
        direction -= right;
    }
    if input.move_right {
        direction += right;
    }

    // Diagonals move no faster than cardinals; zero input normalizes to zero
    let direction = direction.normalize_or_zero();
    camera.pos += direction * CAMERA_SPEED * dt;
}

/// Integrate every live projectile and prune the dead ones.
///
/// Per projectile: apply gravity, move by `vel * dt`, then sweep the step
/// with a ray from the step's start point. A hit closer than the step
/// length is a surface impact; falling past the deletion height prunes
/// without one. Marking is boolean, so a projectile that does both in one
/// step is removed exactly once. The live set is compacted in a single
/// pass after all projectiles are processed - iteration order never
/// depends on removals.
pub fn advance_projectiles(
    projectiles: &mut Vec<Projectile>,
    dt: f32,
    surfaces: &[Surface],
) -> Vec<Impact> {
    let mut remove = vec![false; projectiles.len()];
    let mut impacts = Vec::new();

    for (index, projectile) in projectiles.iter_mut().enumerate() {
        let start = projectile.pos;

        projectile.vel.y += GRAVITY_Y * dt;
        let displacement = projectile.vel * dt;
        projectile.pos += displacement;

        let travel = displacement.length();
        // A stationary step has no direction to cast along; skip the check
        if travel > MIN_RAY_STEP {
            let ray = Ray::new(start, displacement / travel);
            if let Some(hit) = nearest_hit(&ray, surfaces) {
                if hit.distance < travel {
                    impacts.push(Impact {
                        surface: hit.surface,
                        uv: hit.uv,
                    });
                    remove[index] = true;
                }
            }
        }

        if projectile.pos.y < DELETE_HEIGHT {
            remove[index] = true;
        }
    }

    let mut index = 0;
    projectiles.retain(|_| {
        let keep = !remove[index];
        index += 1;
        keep
    });

    impacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{PaintColor, analyze};
    use crate::sim::surface::SurfaceRole;
    use crate::stage::build_stage;

    const DT: f32 = 1.0 / 60.0;

    fn world_with_stage(seed: u64) -> WorldState {
        let mut world = WorldState::new(seed);
        world.install_surfaces(build_stage());
        world
    }

    #[test]
    fn test_gravity_integration() {
        let mut projectiles = vec![Projectile {
            pos: Vec3::new(0.0, 50.0, 0.0),
            vel: Vec3::new(3.0, 0.0, 0.0),
        }];

        let steps = 12;
        for _ in 0..steps {
            advance_projectiles(&mut projectiles, DT, &[]);
        }

        let expected_vy = GRAVITY_Y * DT * steps as f32;
        assert_eq!(projectiles.len(), 1);
        assert!((projectiles[0].vel.y - expected_vy).abs() < 1e-4);
        // Horizontal velocity untouched by gravity
        assert!((projectiles[0].vel.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_displacement_step_is_safe() {
        let surfaces = build_stage();
        let mut projectiles = vec![Projectile {
            pos: Vec3::new(0.0, 1.0, 5.0),
            vel: Vec3::ZERO,
        }];

        // dt = 0 means zero gravity delta and zero displacement
        let impacts = advance_projectiles(&mut projectiles, 0.0, &surfaces);
        assert!(impacts.is_empty());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].pos, Vec3::new(0.0, 1.0, 5.0));
    }

    #[test]
    fn test_impact_reported_with_surface_identity() {
        let surfaces = build_stage();
        // Straight down onto open floor, crossing y = 0 within one step
        let mut projectiles = vec![Projectile {
            pos: Vec3::new(5.0, 1.0, 5.0),
            vel: Vec3::new(0.0, -30.0, 0.0),
        }];

        let impacts = advance_projectiles(&mut projectiles, 0.1, &surfaces);
        assert_eq!(impacts.len(), 1);
        assert_eq!(surfaces[impacts[0].surface].role, SurfaceRole::Floor);
        // Floor UVs: u = (x+10)/20, v = 1 - (z+10)/20
        assert!((impacts[0].uv.x - 0.75).abs() < 1e-3);
        assert!((impacts[0].uv.y - 0.25).abs() < 1e-3);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_no_surfaces_means_no_impacts_and_eventual_pruning() {
        let mut projectiles = vec![Projectile {
            pos: Vec3::new(0.0, 1.0, 0.0),
            vel: Vec3::ZERO,
        }];

        let mut total_impacts = 0;
        for _ in 0..600 {
            total_impacts += advance_projectiles(&mut projectiles, DT, &[]).len();
        }
        assert_eq!(total_impacts, 0);
        assert!(projectiles.is_empty(), "projectile should fall past the deletion height");
    }

    #[test]
    fn test_multi_removal_keeps_exact_survivors() {
        // Two projectiles already below the deletion height, one safe between them
        let safe = Projectile {
            pos: Vec3::new(1.0, 40.0, 1.0),
            vel: Vec3::ZERO,
        };
        let mut projectiles = vec![
            Projectile {
                pos: Vec3::new(0.0, -10.0, 0.0),
                vel: Vec3::ZERO,
            },
            safe,
            Projectile {
                pos: Vec3::new(2.0, -12.0, 2.0),
                vel: Vec3::ZERO,
            },
        ];

        advance_projectiles(&mut projectiles, DT, &[]);
        assert_eq!(projectiles.len(), 1);
        assert!((projectiles[0].pos.x - safe.pos.x).abs() < 1e-6);
    }

    #[test]
    fn test_impact_and_out_of_bounds_same_step_removes_once() {
        let surfaces = build_stage();
        // Fast enough to cross the floor AND end below the deletion height
        let mut projectiles = vec![Projectile {
            pos: Vec3::new(5.0, 0.5, 5.0),
            vel: Vec3::new(0.0, -80.0, 0.0),
        }];

        let impacts = advance_projectiles(&mut projectiles, 0.1, &surfaces);
        assert_eq!(impacts.len(), 1);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_move_camera_directions() {
        let mut camera = CameraPose::default();
        let start = camera.pos;

        let input = TickInput {
            move_forward: true,
            ..Default::default()
        };
        move_camera(&mut camera, &input, 1.0);
        // Default pose faces -z; forward movement decreases z, holds height
        assert!((camera.pos.z - (start.z - CAMERA_SPEED)).abs() < 1e-4);
        assert_eq!(camera.pos.y, start.y);

        // Opposing inputs cancel
        let mut camera = CameraPose::default();
        let input = TickInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        move_camera(&mut camera, &input, 1.0);
        assert!((camera.pos - start).length() < 1e-6);
    }

    #[test]
    fn test_tick_paints_impact_with_selected_color() {
        let mut world = world_with_stage(7);
        world.selected_color = PaintColor::Blue;
        world.projectiles.push(Projectile {
            pos: Vec3::new(5.0, 1.0, 5.0),
            vel: Vec3::new(0.0, -30.0, 0.0),
        });

        let report = tick(&mut world, &TickInput::default(), 0.1);
        assert_eq!(report.impacts.len(), 1);
        assert!(!report.cleared);

        let floor = world.surface_by_role(SurfaceRole::Floor).unwrap();
        let coverage = analyze(&floor.paint);
        assert!(coverage.count(PaintColor::Blue) > 0);
        assert_eq!(coverage.count(PaintColor::Orange), 0);
    }

    #[test]
    fn test_clear_replaces_raster_before_same_tick_impact() {
        let mut world = world_with_stage(8);

        // Lay down blue paint in an earlier tick
        world.selected_color = PaintColor::Blue;
        world.projectiles.push(Projectile {
            pos: Vec3::new(5.0, 1.0, 5.0),
            vel: Vec3::new(0.0, -30.0, 0.0),
        });
        tick(&mut world, &TickInput::default(), 0.1);

        // Same frame: clear request plus an orange impact
        world.selected_color = PaintColor::Orange;
        world.projectiles.push(Projectile {
            pos: Vec3::new(-5.0, 1.0, 5.0),
            vel: Vec3::new(0.0, -30.0, 0.0),
        });
        let input = TickInput {
            clear_paint: true,
            ..Default::default()
        };
        let report = tick(&mut world, &input, 0.1);
        assert!(report.cleared);
        assert_eq!(report.impacts.len(), 1);

        // The clear fully replaced the raster first; only the new impact shows
        let floor = world.surface_by_role(SurfaceRole::Floor).unwrap();
        let coverage = analyze(&floor.paint);
        assert_eq!(coverage.count(PaintColor::Blue), 0);
        assert!(coverage.count(PaintColor::Orange) > 0);
    }

    #[test]
    fn test_tick_fire_spawns_once() {
        let mut world = world_with_stage(9);
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut world, &input, DT);
        assert_eq!(world.projectiles.len(), 1);

        // The driver clears the one-shot; a held key must not respawn
        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.projectiles.len(), 1);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Survivors are exactly the unmarked set, in original order,
            // for any mix of above/below-threshold heights
            #[test]
            fn removal_partition_is_exact(heights in proptest::collection::vec(
                prop_oneof![-20.0f32..-6.0, 2.0f32..40.0], 0..24)) {
                let mut projectiles: Vec<Projectile> = heights
                    .iter()
                    .enumerate()
                    .map(|(i, &y)| Projectile {
                        pos: Vec3::new(i as f32, y, 0.0),
                        vel: Vec3::ZERO,
                    })
                    .collect();

                advance_projectiles(&mut projectiles, 1e-3, &[]);

                let expected: Vec<f32> = heights
                    .iter()
                    .enumerate()
                    .filter(|&(_, &y)| y >= 2.0)
                    .map(|(i, _)| i as f32)
                    .collect();
                let survivors: Vec<f32> =
                    projectiles.iter().map(|p| p.pos.x).collect();
                prop_assert_eq!(survivors, expected);
            }
        }
    }
}
