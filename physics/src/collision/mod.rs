/*!
Collision root module.

This module re-exports the submodules that implement broad- and narrow-phase
collision detection plus contact resolution. The code is split for clarity:

- types:    math aliases and the transient contact data
- shapes:   AABB / bounding-sphere value types and pairwise overlap tests
- octree:   recursive spatial index used as the broad-phase
- resolver: positional correction, velocity impulse, Coulomb friction
*/

pub mod octree;
pub mod resolver;
pub mod shapes;
pub mod types;

// Re-export commonly used types and functions.
pub use octree::{Octree, OctreeItem};
pub use resolver::{Participant, resolve};
pub use shapes::{Aabb, BoundingSphere, Shape, detect};
pub use types::{Contact, Vec3};
