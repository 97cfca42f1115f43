/*!
Math aliases and contact data shared by the collision submodules.

This module intentionally contains no algorithms. It defines what the
narrow-phase hands to the resolver: a transient [`Contact`] that is produced
by `shapes::detect`, consumed immediately by `resolver::resolve`, and never
persisted across steps.
*/

use nalgebra as na;

/// Common math alias for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;

/// A single overlap between two shapes, produced by the narrow-phase.
///
/// Convention: `normal` is the unit direction that pushes the first body (A)
/// out of the second (B), i.e. it points from B toward A. The resolver moves
/// A along `+normal` and B along `-normal`.
#[derive(Clone, Copy, Debug)]
pub struct Contact {
    /// World-space unit separation direction (B toward A).
    pub normal: Vec3,
    /// Overlap distance along `normal` (meters, >= 0).
    pub penetration_depth: f32,
    /// Representative world-space contact point.
    pub point: Vec3,
}
