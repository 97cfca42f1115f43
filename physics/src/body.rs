/*!
Per-entity linear dynamics.

A `RigidBody` owns the linear-motion state of one dynamic entity and advances
it one fixed step at a time with semi-implicit Euler. There is no rotational
state: no torque, no angular velocity.

A kinematic body is an infinite-mass anchor: the integrator and the contact
resolver never move it, but it still displaces other bodies on contact.
*/

use crate::collision::Vec3;
use crate::settings::{
    DEFAULT_DRAG, DEFAULT_FRICTION, DEFAULT_MASS, DEFAULT_RESTITUTION, GRAVITY_MPS2,
};

#[derive(Clone, Debug)]
pub struct RigidBody {
    /// Body mass in kilograms. Must be > 0 for non-kinematic bodies; the
    /// scheduler rejects the tick otherwise (see `PhysicsError::InvalidMass`).
    pub mass: f32,
    /// Linear velocity (meters per second).
    pub velocity: Vec3,
    /// Acceleration derived from the force accumulator on the last step.
    pub acceleration: Vec3,
    /// Force accumulator, cleared at the end of each integration step.
    pub force: Vec3,
    /// Per-body gravity vector (meters per second squared).
    pub gravity: Vec3,
    /// Whether `gravity` is added to the force accumulator each step.
    pub use_gravity: bool,
    /// Kinematic bodies are never mutated by integration or resolution.
    pub is_kinematic: bool,
    /// Linear drag coefficient; applied as `vel *= 1 - drag * dt`.
    pub drag: f32,
    /// Restitution in [0, 1]; a contact uses the pair's minimum.
    pub restitution: f32,
    /// Coulomb friction coefficient; a contact uses the pair's minimum.
    pub friction: f32,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            velocity: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            force: Vec3::zeros(),
            gravity: Vec3::new(0.0, -GRAVITY_MPS2, 0.0),
            use_gravity: true,
            is_kinematic: false,
            drag: DEFAULT_DRAG,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl RigidBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Infinite-mass anchor: unaffected by forces, gravity, and resolution.
    pub fn kinematic() -> Self {
        Self {
            is_kinematic: true,
            use_gravity: false,
            ..Self::default()
        }
    }

    /// Accumulate a force (newtons) for the next integration step.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Apply an instantaneous impulse (newton-seconds): changes velocity
    /// immediately, bypassing the per-step integration.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse / self.mass;
    }

    /// One semi-implicit Euler step, writing the new position through
    /// `position`.
    ///
    /// Kinematic bodies return immediately, including skipping the force
    /// accumulator reset: forces applied to a kinematic body persist and keep
    /// growing across steps. Known quirk, kept as-is (see DESIGN.md).
    ///
    /// The drag term `1 - drag * dt` is a linear damping approximation, not
    /// an exponential decay; it inverts the velocity sign when
    /// `drag * dt > 1`, so callers must bound the product.
    pub fn integrate(&mut self, position: &mut Vec3, dt: f32) {
        if self.is_kinematic {
            return;
        }

        if self.use_gravity {
            self.force += self.gravity * self.mass;
        }

        self.acceleration = self.force / self.mass;
        self.velocity += self.acceleration * dt;
        self.velocity *= 1.0 - self.drag * dt;
        *position += self.velocity * dt;

        self.force = Vec3::zeros();
    }
}
