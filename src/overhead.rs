//! Overhead minimap view
//!
//! A second, top-down camera over the stage. Framing is derived once from
//! the stage bounds; redraws are throttled to a minimum interval so the
//! minimap never rides the full frame rate. Discrete state changes (stage
//! load, paint clear) force an immediate redraw instead of waiting out the
//! interval. Time is injected by the caller, so the throttle is testable
//! without a clock.

use glam::{Vec2, Vec3};

use crate::consts::OVERHEAD_REDRAW_MS;
use crate::sim::surface::Aabb;

/// Breathing room around the stage's longest horizontal dimension
const FRAME_MARGIN: f32 = 1.15;
/// Horizontal half-extent used before any stage is framed
const UNFRAMED_HALF_EXTENT: f32 = 10.0;

/// Top-down view state: fixed straight-down look, throttled redraw
#[derive(Debug, Clone)]
pub struct OverheadView {
    /// Stage center the view hovers over
    pub center: Vec3,
    /// Half of the framed square's edge length, in world units
    pub half_extent: f32,
    interval_ms: f64,
    last_redraw_ms: Option<f64>,
}

impl OverheadView {
    pub fn new() -> Self {
        Self::with_interval(OVERHEAD_REDRAW_MS)
    }

    pub fn with_interval(interval_ms: f64) -> Self {
        Self {
            center: Vec3::ZERO,
            half_extent: UNFRAMED_HALF_EXTENT,
            interval_ms,
            last_redraw_ms: None,
        }
    }

    /// Derive the horizontal framing from the stage bounds.
    ///
    /// Called once after stage load: centered on the stage, sized to
    /// comfortably contain its longest horizontal dimension.
    pub fn frame(&mut self, bounds: &Aabb) {
        let size = bounds.size();
        self.center = bounds.center();
        self.half_extent = size.x.max(size.z) / 2.0 * FRAME_MARGIN;
    }

    /// Throttle gate: grants a redraw if forced or the interval elapsed.
    ///
    /// Granting records `now_ms`, so back-to-back unforced calls inside
    /// the interval collapse to a single redraw.
    pub fn should_redraw(&mut self, now_ms: f64, force: bool) -> bool {
        let due = match self.last_redraw_ms {
            None => true,
            Some(last) => now_ms - last >= self.interval_ms,
        };
        if force || due {
            self.last_redraw_ms = Some(now_ms);
            return true;
        }
        false
    }

    /// Project a world point into map space, [0,1]² over the framed square
    ///
    /// x maps left-to-right, z top-to-bottom; the look direction is fixed
    /// straight down so height is dropped entirely.
    pub fn world_to_map(&self, point: Vec3) -> Vec2 {
        let extent = self.half_extent * 2.0;
        Vec2::new(
            (point.x - self.center.x + self.half_extent) / extent,
            (point.z - self.center.z + self.half_extent) / extent,
        )
    }

    /// Inverse of [`world_to_map`]: a map point back onto the ground plane
    pub fn map_to_world(&self, map: Vec2) -> Vec3 {
        let extent = self.half_extent * 2.0;
        Vec3::new(
            self.center.x - self.half_extent + map.x * extent,
            0.0,
            self.center.z - self.half_extent + map.y * extent,
        )
    }
}

impl Default for OverheadView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_box() -> Aabb {
        Aabb {
            min: Vec3::new(-10.0, 0.0, -10.0),
            max: Vec3::new(10.0, 2.0, 10.0),
        }
    }

    #[test]
    fn test_framing_from_bounds() {
        let mut view = OverheadView::new();
        view.frame(&stage_box());
        assert_eq!(view.center, Vec3::new(0.0, 1.0, 0.0));
        assert!((view.half_extent - 10.0 * FRAME_MARGIN).abs() < 1e-5);
    }

    #[test]
    fn test_first_call_redraws() {
        let mut view = OverheadView::with_interval(1000.0);
        assert!(view.should_redraw(0.0, false));
    }

    #[test]
    fn test_throttle_collapses_calls_within_interval() {
        let mut view = OverheadView::with_interval(1000.0);
        assert!(view.should_redraw(0.0, false));
        // Two consecutive unforced calls inside the interval: one redraw total
        assert!(!view.should_redraw(400.0, false));
        assert!(!view.should_redraw(900.0, false));
        // Interval elapsed
        assert!(view.should_redraw(1000.0, false));
    }

    #[test]
    fn test_force_redraws_regardless_of_elapsed() {
        let mut view = OverheadView::with_interval(1000.0);
        assert!(view.should_redraw(0.0, false));
        assert!(view.should_redraw(1.0, true));
        // Forcing also resets the throttle window
        assert!(!view.should_redraw(900.0, false));
    }

    #[test]
    fn test_world_map_round_trip() {
        let mut view = OverheadView::new();
        view.frame(&stage_box());

        // Stage center lands in the middle of the map
        let mid = view.world_to_map(view.center);
        assert!((mid - Vec2::new(0.5, 0.5)).length() < 1e-5);

        let p = Vec3::new(3.0, 0.0, -7.0);
        let back = view.map_to_world(view.world_to_map(p));
        assert!((back.x - p.x).abs() < 1e-4);
        assert!((back.z - p.z).abs() < 1e-4);
    }
}
