//! Error taxonomy for the physics core.
//!
//! A tick either completes or its error is absorbed at the `update` call
//! boundary: `PhysicsSystem::update` logs the failure and returns normally so
//! the next frame proceeds with the accumulator state intact. There is no
//! retry; a faulted tick's remaining work is simply not redone.

use thiserror::Error;

use crate::world::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PhysicsError {
    /// A non-kinematic body was configured with a mass that cannot be
    /// inverted. Caught before it can poison velocities with NaN.
    #[error("entity {entity:?}: non-kinematic body has invalid mass {mass}")]
    InvalidMass { entity: EntityId, mass: f32 },

    /// The frame delta handed to `update` was negative or non-finite.
    #[error("invalid frame delta {dt}; expected a finite value >= 0")]
    InvalidTimeStep { dt: f32 },
}
