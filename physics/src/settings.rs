/*!
Physics tuning constants.

These centralize the parameters used by the fixed-timestep scheduler, the
octree broad-phase, and the contact resolver. Keeping them together makes
tuning easier and helps ensure deterministic behavior across platforms.

Notes
- Distances are in meters, time in seconds, mass in kilograms.
- Favor practical world-space tolerances over machine epsilon for robust
  behavior.
- Per-body customization (drag, restitution, friction) lives on `RigidBody`;
  these are the defaults.
*/

/// Fixed simulation step in seconds. The scheduler accumulates frame deltas
/// and runs whole steps of this size, carrying the remainder forward.
pub const FIXED_TIME_STEP: f32 = 1.0 / 60.0;

/// Half extent of the default world volume per axis (meters).
/// Entities outside the ±`WORLD_HALF_EXTENT` cube are not inserted into the
/// spatial index and therefore never collide.
pub const WORLD_HALF_EXTENT: f32 = 1000.0;

/// Objects a single octree node holds before it splits into octants.
pub const OCTREE_MAX_OBJECTS: usize = 8;

/// Maximum octree subdivision depth. Nodes at this depth store objects
/// directly regardless of count.
pub const OCTREE_MAX_DEPTH: u32 = 4;

/// Minimum tangential speed for friction to apply (meters per second).
/// Below this the tangent direction is numerically unreliable, so the
/// resolver skips the friction impulse for the step.
pub const FRICTION_EPS: f32 = 1.0e-4;

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, equality checks in world space, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Gravity magnitude in meters per second squared (positive value).
/// The default body gravity vector is `(0, -GRAVITY_MPS2, 0)`.
pub const GRAVITY_MPS2: f32 = 9.81;

/// Default body mass in kilograms.
pub const DEFAULT_MASS: f32 = 1.0;

/// Default linear drag coefficient. Applied as `vel *= 1 - drag * dt` each
/// step; callers must keep `drag * dt` below 1 or the velocity sign flips.
pub const DEFAULT_DRAG: f32 = 0.1;

/// Default restitution (bounciness) in [0, 1].
pub const DEFAULT_RESTITUTION: f32 = 0.5;

/// Default Coulomb friction coefficient.
pub const DEFAULT_FRICTION: f32 = 0.5;
