//! Splat Range - a first-person paint-splat shooting gallery
//!
//! Core modules:
//! - `sim`: Projectile simulation (ballistics, ray-cast collision, world state)
//! - `paint`: Paint textures, impact decals, coverage analysis
//! - `stage`: Static stage geometry (collidable surfaces, bounds)
//! - `overhead`: Throttled top-down minimap view
//! - `settings`: Persisted user preferences

pub mod overhead;
pub mod paint;
pub mod settings;
pub mod sim;
pub mod stage;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Downward gravitational acceleration applied to projectiles (units/s²)
    pub const GRAVITY_Y: f32 = -15.0;
    /// Initial projectile speed along the camera forward direction (units/s)
    pub const LAUNCH_SPEED: f32 = 15.0;
    /// Projectiles below this height are pruned without an impact
    pub const DELETE_HEIGHT: f32 = -5.0;
    /// Projectile spawn drop below the eye point
    pub const SPAWN_DROP: f32 = 0.25;
    /// Projectile spawn offset along the view direction
    pub const SPAWN_FORWARD: f32 = 1.0;

    /// Camera eye height above the floor
    pub const EYE_HEIGHT: f32 = 2.0;
    /// Camera walk speed (units/s)
    pub const CAMERA_SPEED: f32 = 9.0;

    /// Steps shorter than this skip the collision ray cast entirely
    pub const MIN_RAY_STEP: f32 = 1e-6;
    /// Frame delta clamp to keep a stalled tab from teleporting projectiles
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Paint texture edge length in pixels (square, fixed for the session)
    pub const PAINT_TEXTURE_SIZE: usize = 2048;
    /// Minimum interval between unforced minimap redraws (ms)
    pub const OVERHEAD_REDRAW_MS: f64 = 1000.0;
}
